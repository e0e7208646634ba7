#![cfg(test)]

use std::ops::Range;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};
use url::Url;

use crate::error::AppResult;
use crate::services::{HttpResponse, HttpService};

type Responder = Box<dyn Fn(&Url) -> (u16, String) + Send + Sync>;

/// In-memory transport answering from a closure and recording every URL.
pub struct ScriptedHttp {
    respond: Responder,
    requested: Mutex<Vec<String>>,
}

impl ScriptedHttp {
    pub fn new(respond: impl Fn(&Url) -> (u16, String) + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpService for ScriptedHttp {
    async fn get(&self, url: &Url) -> AppResult<HttpResponse> {
        self.requested.lock().unwrap().push(url.to_string());
        let (status, body) = (self.respond)(url);
        Ok(HttpResponse { status, body })
    }
}

pub fn json_response(status: u16, body: Value) -> (u16, String) {
    (status, body.to_string())
}

/// Search page whose item `i` has id `i + 1` and `100 - i` forks.
pub fn search_page(indices: Range<usize>) -> Value {
    let items: Vec<Value> = indices
        .map(|i| {
            json!({
                "id": i + 1,
                "name": format!("repo-{}", i + 1),
                "forks": 100usize.saturating_sub(i),
            })
        })
        .collect();
    json!({ "total_count": items.len(), "items": items })
}

/// Value of the `page` query parameter, defaulting to 1.
pub fn page_of(url: &Url) -> usize {
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(1)
}
