//! HTML microdata extraction.
//!
//! Implements the item/property crawl of the HTML microdata model on top of
//! `scraper`: top-level items are `itemscope` elements without `itemprop`;
//! properties are found by walking descendants without entering nested
//! items, plus any elements named by `itemref`.

use crate::model::{PropertyBag, RawNode};
use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeMap, HashMap};
use url::Url;

/// Turns a fetched document into its top-level microdata items.
pub trait Extractor: Send + Sync {
    /// Items in document order. `page_url` resolves relative URL values.
    fn extract(&self, html: &str, page_url: &str) -> Vec<PropertyBag>;
}

/// Standard HTML microdata extractor.
#[derive(Debug, Clone, Default)]
pub struct MicrodataExtractor;

impl Extractor for MicrodataExtractor {
    fn extract(&self, html: &str, page_url: &str) -> Vec<PropertyBag> {
        let document = Html::parse_document(html);
        let ctx = CrawlContext {
            base: Url::parse(page_url).ok(),
            ids: index_ids(&document),
        };

        let Ok(sel) = Selector::parse("[itemscope]") else {
            return Vec::new();
        };

        document
            .select(&sel)
            .filter(|el| el.value().attr("itemprop").is_none())
            .map(|el| ctx.read_item(el, &mut Vec::new()))
            .collect()
    }
}

struct CrawlContext<'a> {
    base: Option<Url>,
    ids: HashMap<&'a str, ElementRef<'a>>,
}

impl<'a> CrawlContext<'a> {
    fn read_item(&self, item: ElementRef<'a>, visiting: &mut Vec<ElementRef<'a>>) -> PropertyBag {
        visiting.push(item);

        let attrs = item.value();
        let types = attrs
            .attr("itemtype")
            .map(|t| t.split_whitespace().map(String::from).collect())
            .unwrap_or_default();
        let id = attrs.attr("itemid").map(|s| self.resolve(s));

        let mut values: BTreeMap<String, Vec<RawNode>> = BTreeMap::new();
        // Elements already crawled for this item; itemref never adds them twice.
        let mut seen = Vec::new();
        for child in item.children().filter_map(ElementRef::wrap) {
            self.crawl(child, visiting, &mut seen, &mut values);
        }
        if let Some(refs) = attrs.attr("itemref") {
            for target in refs.split_whitespace().filter_map(|id| self.ids.get(id)) {
                self.crawl(*target, visiting, &mut seen, &mut values);
            }
        }

        visiting.pop();

        PropertyBag {
            types,
            id,
            properties: values
                .into_iter()
                .map(|(name, list)| (name, RawNode::List(list)))
                .collect(),
        }
    }

    fn crawl(
        &self,
        el: ElementRef<'a>,
        visiting: &mut Vec<ElementRef<'a>>,
        seen: &mut Vec<ElementRef<'a>>,
        values: &mut BTreeMap<String, Vec<RawNode>>,
    ) {
        if seen.contains(&el) {
            return;
        }
        seen.push(el);

        if let Some(names) = el.value().attr("itemprop") {
            if let Some(value) = self.property_value(el, visiting) {
                for name in names.split_whitespace() {
                    values.entry(name.to_string()).or_default().push(value.clone());
                }
            }
        }

        // Properties of a nested item belong to that item.
        if el.value().attr("itemscope").is_some() {
            return;
        }
        for child in el.children().filter_map(ElementRef::wrap) {
            self.crawl(child, visiting, seen, values);
        }
    }

    fn property_value(
        &self,
        el: ElementRef<'a>,
        visiting: &mut Vec<ElementRef<'a>>,
    ) -> Option<RawNode> {
        let e = el.value();
        if e.attr("itemscope").is_some() {
            if visiting.contains(&el) {
                return None;
            }
            return Some(RawNode::Bag(self.read_item(el, visiting)));
        }

        let value = match e.name() {
            "meta" => e.attr("content").unwrap_or_default().to_string(),
            "audio" | "embed" | "iframe" | "img" | "source" | "track" | "video" => {
                self.resolve(e.attr("src").unwrap_or_default())
            }
            "a" | "area" | "link" => self.resolve(e.attr("href").unwrap_or_default()),
            "object" => self.resolve(e.attr("data").unwrap_or_default()),
            "data" | "meter" => e.attr("value").unwrap_or_default().to_string(),
            "time" => match e.attr("datetime") {
                Some(dt) => dt.to_string(),
                None => text_content(el),
            },
            _ => text_content(el),
        };
        Some(RawNode::Scalar(value))
    }

    fn resolve(&self, href: &str) -> String {
        match &self.base {
            Some(base) if !href.is_empty() => base
                .join(href)
                .map(String::from)
                .unwrap_or_else(|_| href.to_string()),
            _ => href.to_string(),
        }
    }
}

fn index_ids(document: &Html) -> HashMap<&str, ElementRef<'_>> {
    let mut ids = HashMap::new();
    if let Ok(sel) = Selector::parse("[id]") {
        for el in document.select(&sel) {
            if let Some(id) = el.value().attr("id") {
                ids.entry(id).or_insert(el);
            }
        }
    }
    ids
}

fn text_content(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://www.wikitree.com/wiki/Sloan-518";

    fn list(node: &RawNode) -> &[RawNode] {
        match node {
            RawNode::List(items) => items,
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_person_with_nested_reference() {
        let html = r#"
        <html><body>
        <div itemscope itemtype="http://schema.org/Person">
            <h1><span itemprop="name">Clayton   Sloan</span></h1>
            <meta itemprop="gender" content="male">
            <time itemprop="birthDate" datetime="1890-01-02">2 Jan 1890</time>
            <span itemprop="children" itemscope itemtype="http://schema.org/Person">
                <a itemprop="url" href="/wiki/Sloan-519"><span itemprop="name">Edna Sloan</span></a>
            </span>
        </div>
        </body></html>
        "#;

        let items = MicrodataExtractor.extract(html, PAGE);
        assert_eq!(items.len(), 1);
        let person = &items[0];
        assert_eq!(person.primary_type(), Some("http://schema.org/Person"));
        assert_eq!(person.first_scalar("name"), Some("Clayton Sloan"));
        assert_eq!(person.first_scalar("gender"), Some("male"));
        assert_eq!(person.first_scalar("birthDate"), Some("1890-01-02"));

        let children = list(&person.properties["children"]);
        assert_eq!(children.len(), 1);
        let RawNode::Bag(child) = &children[0] else {
            panic!("expected nested item");
        };
        assert_eq!(
            child.first_scalar("url"),
            Some("https://www.wikitree.com/wiki/Sloan-519")
        );
        // Nested properties do not leak into the outer item.
        assert_eq!(list(&person.properties["name"]).len(), 1);
    }

    #[test]
    fn test_multiple_names_and_values() {
        let html = r#"
        <div itemscope>
            <span itemprop="givenName additionalName">Mary</span>
            <img itemprop="image" src="/photo/a.jpg">
            <img itemprop="image" src="https://cdn.example.com/b.jpg">
        </div>
        "#;

        let items = MicrodataExtractor.extract(html, PAGE);
        let item = &items[0];
        assert!(item.types.is_empty());
        assert_eq!(item.first_scalar("givenName"), Some("Mary"));
        assert_eq!(item.first_scalar("additionalName"), Some("Mary"));
        let images = list(&item.properties["image"]);
        assert_eq!(
            images,
            &[
                RawNode::from("https://www.wikitree.com/photo/a.jpg"),
                RawNode::from("https://cdn.example.com/b.jpg"),
            ]
        );
    }

    #[test]
    fn test_itemref_pulls_properties() {
        let html = r#"
        <div itemscope itemtype="http://schema.org/Person" itemref="extra"></div>
        <p id="extra"><span itemprop="deathDate">1960</span></p>
        "#;

        let items = MicrodataExtractor.extract(html, PAGE);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].first_scalar("deathDate"), Some("1960"));
    }

    #[test]
    fn test_itemref_does_not_repeat_properties() {
        let html = r#"
        <div itemscope itemtype="http://schema.org/Person" itemref="n">
            <span id="n" itemprop="name">Jane Doe</span>
        </div>
        <div itemscope itemtype="http://schema.org/Person" itemref="d d">
            <span itemprop="name">John Doe</span>
        </div>
        <p id="d"><span itemprop="deathDate">1970</span></p>
        "#;

        let items = MicrodataExtractor.extract(html, PAGE);
        assert_eq!(items.len(), 2);
        assert_eq!(list(&items[0].properties["name"]), &[RawNode::from("Jane Doe")]);
        assert_eq!(list(&items[1].properties["deathDate"]), &[RawNode::from("1970")]);
        assert_eq!(list(&items[1].properties["name"]), &[RawNode::from("John Doe")]);
    }

    #[test]
    fn test_no_items() {
        let items = MicrodataExtractor.extract("<html><body><p>hi</p></body></html>", PAGE);
        assert!(items.is_empty());
    }

    #[test]
    fn test_nested_items_are_not_top_level() {
        let html = r#"
        <div itemscope itemtype="http://schema.org/Person">
            <div itemprop="spouse" itemscope itemtype="http://schema.org/Person">
                <link itemprop="url" href="/wiki/Carvell-50">
            </div>
        </div>
        <div itemscope itemtype="http://schema.org/Place"><span itemprop="name">Ontario</span></div>
        "#;

        let items = MicrodataExtractor.extract(html, PAGE);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].primary_type(), Some("http://schema.org/Place"));
    }
}
