//! Subcommand implementations.

use anyhow::{Context, Result};
use serde_json::{json, Map};
use std::sync::Arc;
use wikitree_graph::Graph;

pub async fn show(graph: &Arc<Graph>, id: &str, attrs: &[String], as_json: bool) -> Result<()> {
    let person = graph.person(id);
    let node = person.node();
    let all = node
        .load()
        .await
        .with_context(|| format!("loading {}", person.url()))?;

    if attrs.is_empty() {
        if as_json {
            println!("{}", serde_json::to_string_pretty(all)?);
        } else {
            println!("{node}");
        }
        return Ok(());
    }

    let mut selected = Map::new();
    for name in attrs {
        let value = node.get(name).await?;
        selected.insert(name.clone(), serde_json::to_value(value)?);
    }
    if as_json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
    } else {
        for (name, value) in &selected {
            println!("{name}: {value}");
        }
    }
    Ok(())
}

pub fn names(graph: &Arc<Graph>, id: &str, as_json: bool) -> Result<()> {
    let person = graph.person(id);
    let names = person.node().attribute_names();
    if as_json {
        println!("{}", serde_json::to_string(&names)?);
    } else {
        println!("{person:?}");
        for name in names {
            println!("  {name}");
        }
    }
    Ok(())
}

pub async fn family(graph: &Arc<Graph>, id: &str, as_json: bool) -> Result<()> {
    let person = graph.person(id);
    let name = person
        .name()
        .await
        .with_context(|| format!("loading {}", person.url()))?
        .unwrap_or("(unnamed)")
        .to_string();

    let groups = [
        ("parents", person.parents().await?),
        ("spouses", person.spouses().await?),
        ("siblings", person.siblings().await?),
        ("children", person.children().await?),
    ];

    let mut out = Map::new();
    for (label, relatives) in &groups {
        let mut entries = Vec::with_capacity(relatives.len());
        for relative in relatives {
            let rel_name = relative
                .name()
                .await
                .with_context(|| format!("loading {}", relative.url()))?;
            entries.push(json!({"url": relative.url(), "name": rel_name}));
        }
        out.insert(label.to_string(), entries.into());
    }

    if as_json {
        out.insert("name".to_string(), name.into());
        out.insert("url".to_string(), person.url().into());
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{name} <{}>", person.url());
    for (label, entries) in &out {
        let Some(entries) = entries.as_array() else {
            continue;
        };
        if entries.is_empty() {
            continue;
        }
        println!("  {label}:");
        for entry in entries {
            println!(
                "    {} <{}>",
                entry["name"].as_str().unwrap_or("(unnamed)"),
                entry["url"].as_str().unwrap_or_default()
            );
        }
    }
    Ok(())
}
