//! `wikitree` — print WikiTree profiles resolved from their page microdata.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wikitree_graph::{Graph, GraphConfig};

#[derive(Parser)]
#[command(name = "wikitree", version, about = "Browse WikiTree profiles")]
struct Cli {
    /// JSON config file for the graph.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Site origin to resolve identifiers against.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print JSON instead of the debug rendering.
    #[arg(long, global = true)]
    json: bool,

    /// Log resolver activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a profile and print it, or only the requested attributes.
    Show {
        /// Profile identifier, site path or URL (e.g. Sloan-518).
        id: String,
        /// Attribute to print; repeatable.
        #[arg(short, long = "attr")]
        attrs: Vec<String>,
    },
    /// List attribute names a profile may have, without fetching it.
    Names { id: String },
    /// Print a person and the names of their immediate relatives.
    Family { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "wikitree_graph=debug"
    } else {
        "wikitree_graph=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => GraphConfig::from_file(path)?,
        None => GraphConfig::default(),
    }
    .with_env_overrides();
    if let Some(base) = &cli.base_url {
        config = config.with_base_url(base.as_str());
    }

    debug!(base_url = %config.base_url, "resolved configuration");
    let graph = Graph::new(config)?;
    match &cli.command {
        Command::Show { id, attrs } => commands::show(&graph, id, attrs, cli.json).await,
        Command::Names { id } => commands::names(&graph, id, cli.json),
        Command::Family { id } => commands::family(&graph, id, cli.json).await,
    }
}
