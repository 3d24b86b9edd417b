//! Resolving profiles served over HTTP by a fixture server.

use assert_json_diff::{assert_json_eq, assert_json_include};
use serde_json::json;
use std::sync::Arc;
use wikitree_graph::{
    Extractor, Graph, GraphConfig, PropertyBag, ResolveError, Value,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Treats the response body as already-extracted microdata items in JSON.
struct JsonItems;

impl Extractor for JsonItems {
    fn extract(&self, body: &str, _page_url: &str) -> Vec<PropertyBag> {
        serde_json::from_str(body).unwrap_or_default()
    }
}

async fn serve(server: &MockServer, route: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(times)
        .mount(server)
        .await;
}

fn json_graph(server: &MockServer) -> Arc<Graph> {
    Graph::builder(GraphConfig::default().with_base_url(server.uri()))
        .extractor(Arc::new(JsonItems))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_jane_doe_profile() {
    let server = MockServer::start().await;
    let items = json!([{
        "type": ["http://schema.org/Person"],
        "properties": {
            "name": ["Jane Doe"],
            "children": [{
                "type": ["http://schema.org/Person"],
                "properties": {"url": ["/wiki/X-2"]}
            }],
            "parent": []
        }
    }]);
    serve(&server, "/wiki/X-1", items.to_string(), 1).await;

    let graph = json_graph(&server);
    let jane = graph.person("X-1").into_node();

    assert_eq!(jane.get("name").await.unwrap(), &Value::from("Jane Doe"));

    let children = jane.get("children").await.unwrap().as_list().unwrap();
    assert_eq!(children.len(), 1);
    let child = children[0].as_entity().unwrap();
    assert_eq!(child.url(), format!("{}/wiki/X-2", server.uri()));
    assert!(!child.is_loaded());

    assert_eq!(jane.get("parent").await.unwrap(), &Value::List(vec![]));

    assert_json_eq!(
        serde_json::to_value(jane.load().await.unwrap()).unwrap(),
        json!({
            "name": "Jane Doe",
            "children": [format!("{}/wiki/X-2", server.uri())],
            "parent": []
        })
    );
}

#[tokio::test]
async fn test_identity_forms_share_one_url() {
    let server = MockServer::start().await;
    let graph = json_graph(&server);

    let absolute = graph.person(&format!("{}/wiki/X-1", server.uri()));
    let relative = graph.person("/wiki/X-1");
    let bare = graph.person("X-1");

    assert_eq!(absolute.url(), relative.url());
    assert_eq!(relative.url(), bare.url());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_html_profile_cycle() {
    let server = MockServer::start().await;
    let a = r#"<html><body><div itemscope itemtype="http://schema.org/Person">
        <span itemprop="name">Anne Smith</span>
        <span itemprop="givenName">Anne</span>
        <span itemprop="birth" itemscope itemtype="http://schema.org/BirthEvent">
            <span itemprop="location">Kingston</span>
        </span>
        <span itemprop="children" itemscope itemtype="http://schema.org/Person">
            <a itemprop="url" href="/wiki/Smith-2"><span itemprop="name">Ben</span></a>
        </span>
    </div></body></html>"#;
    let b = r#"<html><body><div itemscope itemtype="http://schema.org/Person">
        <span itemprop="name">Ben Smith</span>
        <span itemprop="parent" itemscope itemtype="http://schema.org/Person">
            <a itemprop="url" href="/wiki/Smith-1"><span itemprop="name">Anne</span></a>
        </span>
    </div></body></html>"#;
    serve(&server, "/wiki/Smith-1", a.to_string(), 2).await;
    serve(&server, "/wiki/Smith-2", b.to_string(), 1).await;

    let graph = Graph::new(GraphConfig::default().with_base_url(server.uri())).unwrap();
    let anne = graph.person("Smith-1");

    assert_eq!(anne.given_name().await.unwrap(), Some("Anne"));
    assert_json_include!(
        actual: serde_json::to_value(anne.node().load().await.unwrap()).unwrap(),
        expected: json!({"birth": {"location": "Kingston"}})
    );

    let ben = anne.children().await.unwrap().remove(0);
    assert_eq!(ben.name().await.unwrap(), Some("Ben Smith"));

    let back = ben.parents().await.unwrap().remove(0);
    assert_eq!(back.url(), anne.url());
    assert_eq!(back.name().await.unwrap(), Some("Anne Smith"));
}

#[tokio::test]
async fn test_page_without_microdata() {
    let server = MockServer::start().await;
    serve(&server, "/wiki/Plain-1", "<html><body>nothing</body></html>".into(), 1).await;

    let graph = Graph::new(GraphConfig::default().with_base_url(server.uri())).unwrap();
    let err = graph.person("Plain-1").name().await.unwrap_err();
    assert!(matches!(err, ResolveError::NoMicrodata { .. }));
}

#[tokio::test]
async fn test_transport_failure_is_retried_on_next_access() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/Gone-1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let graph = Graph::new(GraphConfig::default().with_base_url(server.uri())).unwrap();
    let gone = graph.person("Gone-1");

    assert!(matches!(gone.name().await, Err(ResolveError::Transport(_))));
    assert!(!gone.node().is_loaded());
    assert!(matches!(gone.name().await, Err(ResolveError::Transport(_))));
}
