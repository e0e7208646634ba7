use std::collections::VecDeque;

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::infra::github::urls::redact;
use crate::services::{HttpResponse, HttpService};

/// Top-level shape of one page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLayout {
    /// The body is a JSON array of items.
    Bare,
    /// The body is an object holding the item array under this key.
    Field(&'static str),
}

impl PageLayout {
    pub fn items(&self, body: &str) -> AppResult<Vec<Value>> {
        let value: Value = serde_json::from_str(body)
            .map_err(|err| AppError::Decode(format!("response is not valid JSON: {err}")))?;

        let items = match (self, value) {
            (PageLayout::Bare, Value::Array(items)) => items,
            (PageLayout::Field(key), Value::Object(mut object)) => match object.remove(*key) {
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Err(AppError::Decode(format!("'{key}' is not an array")));
                }
                None => {
                    return Err(AppError::Decode(format!("response has no '{key}' field")));
                }
            },
            (PageLayout::Bare, _) => {
                return Err(AppError::Decode("expected a JSON array".to_string()));
            }
            (PageLayout::Field(key), _) => {
                return Err(AppError::Decode(format!(
                    "expected a JSON object with '{key}'"
                )));
            }
        };
        Ok(items)
    }
}

/// Default item extraction: deserialize the raw object into `T`.
pub fn decode_item<T: DeserializeOwned>(item: Value) -> AppResult<T> {
    serde_json::from_value(item).map_err(|err| AppError::Decode(format!("malformed item: {err}")))
}

type PageUrlFn<'a> = Box<dyn Fn(u32) -> AppResult<Url> + Send + Sync + 'a>;

/// Lazy cursor over a page-numbered endpoint.
///
/// Pages are requested one at a time, only when the buffered items run out
/// and fewer than `target` items have been handed out. Iteration ends on the
/// first empty page or once `target` items were produced; the unused tail of
/// the last page is dropped without being extracted.
pub struct Pager<'a, T> {
    http: &'a dyn HttpService,
    url_for_page: PageUrlFn<'a>,
    layout: PageLayout,
    extract: fn(Value) -> AppResult<T>,
    target: usize,
    page: u32,
    buffered: VecDeque<T>,
    produced: usize,
    exhausted: bool,
}

impl<'a, T> Pager<'a, T> {
    pub fn new(
        http: &'a dyn HttpService,
        layout: PageLayout,
        target: usize,
        url_for_page: impl Fn(u32) -> AppResult<Url> + Send + Sync + 'a,
        extract: fn(Value) -> AppResult<T>,
    ) -> Self {
        Self {
            http,
            url_for_page: Box::new(url_for_page),
            layout,
            extract,
            target,
            page: 1,
            buffered: VecDeque::new(),
            produced: 0,
            exhausted: false,
        }
    }

    pub async fn next(&mut self) -> AppResult<Option<T>> {
        loop {
            if self.produced >= self.target {
                return Ok(None);
            }
            if let Some(item) = self.buffered.pop_front() {
                self.produced += 1;
                return Ok(Some(item));
            }
            if self.exhausted {
                return Ok(None);
            }
            self.fetch_page().await?;
        }
    }

    pub async fn collect(mut self) -> AppResult<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Rewinds to page 1 so the sequence can be produced again.
    pub fn restart(&mut self) {
        self.page = 1;
        self.buffered.clear();
        self.produced = 0;
        self.exhausted = false;
    }

    /// Number of the page the next fetch will request.
    pub fn next_page(&self) -> u32 {
        self.page
    }

    async fn fetch_page(&mut self) -> AppResult<()> {
        let url = (self.url_for_page)(self.page)?;
        info!("fetching page {} from {}", self.page, redact(&url));

        let response = self.http.get(&url).await?;
        let items = self.page_items(&url, &response)?;

        if items.is_empty() {
            debug!("page {} is empty; no more results", self.page);
            self.exhausted = true;
            return Ok(());
        }

        let wanted = self.target - self.produced - self.buffered.len();
        for item in items.into_iter().take(wanted) {
            self.buffered.push_back((self.extract)(item)?);
        }
        self.page += 1;
        Ok(())
    }

    fn page_items(&self, url: &Url, response: &HttpResponse) -> AppResult<Vec<Value>> {
        match response.status {
            204 => Ok(Vec::new()),
            401 => Err(AppError::Unauthorized),
            403 => Err(AppError::RateLimited),
            _ if response.is_success() => self.layout.items(&response.body),
            status => Err(AppError::Network(format!(
                "{} responded with HTTP {status}",
                redact(url)
            ))),
        }
    }
}
