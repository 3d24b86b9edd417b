//! Test doubles shared by the unit tests.

use crate::acquisition::Fetcher;
use crate::config::GraphConfig;
use crate::error::FetchError;
use crate::resolve::Graph;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Number of fetches a [`CountingFetcher`] has served.
#[derive(Debug, Clone, Default)]
pub struct FetchCount(Arc<AtomicUsize>);

impl FetchCount {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// In-memory fetcher that counts requests. Unknown URLs answer 404.
#[derive(Debug, Clone, Default)]
pub struct CountingFetcher {
    pages: HashMap<String, String>,
    count: FetchCount,
}

impl CountingFetcher {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl Fetcher for CountingFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.count.0.fetch_add(1, Ordering::SeqCst);
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// A default-config graph over `fetcher`, plus a handle on its fetch count.
pub fn fixture_graph(fetcher: CountingFetcher) -> (Arc<Graph>, FetchCount) {
    let count = fetcher.count.clone();
    let graph = Graph::builder(GraphConfig::default())
        .fetcher(Arc::new(fetcher))
        .build()
        .expect("fixture graph");
    (graph, count)
}

/// A page holding one Person item with the given inner markup.
pub fn profile_html(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><body>
        <div itemscope itemtype="http://schema.org/Person">{body}</div>
        </body></html>"#
    )
}
