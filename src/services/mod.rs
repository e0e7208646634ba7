pub mod http;

pub use http::{HttpResponse, HttpService};
