//! Document acquisition: fetching pages and extracting their microdata.

pub mod http_client;
pub mod microdata;

pub use http_client::{Fetcher, HttpClient};
pub use microdata::{Extractor, MicrodataExtractor};
