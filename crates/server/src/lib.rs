//! Core library for the `boardpress` content gateway.
//!
//! The gateway advertises a fixed catalog of article and site operations
//! over MCP and performs each one as a single call into an injected store
//! adapter (markdown files or a hosted table). The main entry point is the
//! [`run`] function, which parses the CLI and serves over stdio or HTTP.
//!
//! The model is single-request-at-a-time: each invoke fully completes,
//! including awaited I/O, before the next request is accepted. There is no
//! shared mutable state across calls beyond the process-wide configuration
//! read at startup.

#![deny(unsafe_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use boardpress_store::{ArticleStore, FileStore, StoreCapabilities, TableConfig, TableStore};
use clap::Parser;
use rmcp::service::serve_server;
use tokio::runtime::Runtime;

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod handler;
pub mod http_transport;

use crate::app::ArticleService;
use crate::cli::{Backend, Cli, Commands};

/// Name reported by the health check and initialize handshake.
pub const SERVICE_NAME: &str = "boardpress";

/// Parses the CLI and runs the selected command.
pub fn run() -> Result<()> {
    config::apply_config_to_env();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve {
        backend: Backend::File,
        site_root: None,
        http: None,
    }) {
        Commands::Serve {
            backend,
            site_root,
            http,
        } => serve(backend, site_root, http),
        Commands::List { backend, site_root } => list_articles(backend, site_root),
        Commands::Tools { backend } => print_tools(backend),
    }
}

/// Constructs the store adapter for the selected backend.
fn build_store(backend: Backend, site_root: Option<PathBuf>) -> Result<Arc<dyn ArticleStore>> {
    match backend {
        Backend::File => {
            let root = site_root.unwrap_or_else(|| PathBuf::from("."));
            Ok(Arc::new(FileStore::new(root)))
        }
        Backend::Table => Ok(Arc::new(TableStore::new(TableConfig::from_env()?)?)),
    }
}

fn serve(backend: Backend, site_root: Option<PathBuf>, http: Option<String>) -> Result<()> {
    let store = build_store(backend, site_root)?;
    let rt = Runtime::new()?;
    match http {
        Some(addr) => {
            let caps = http_capabilities(store.capabilities(), &addr);
            let service = Arc::new(ArticleService::with_capabilities(store, caps));
            rt.block_on(http_transport::serve_http(service, &addr))
        }
        None => {
            let service = ArticleService::new(store);
            let running = rt.block_on(async {
                serve_server(service, rmcp::transport::stdio())
                    .await
                    .map_err(|e| anyhow!("failed to start server: {e}"))
            })?;
            rt.block_on(async {
                running
                    .waiting()
                    .await
                    .map_err(|e| anyhow!("server task ended: {e}"))
            })?;
            Ok(())
        }
    }
}

/// The publish escape hatch assumes an operator-controlled transport, so it
/// never rides on a non-loopback HTTP bind.
fn http_capabilities(mut caps: StoreCapabilities, bind_addr: &str) -> StoreCapabilities {
    let loopback = bind_addr
        .parse::<SocketAddr>()
        .map(|addr| addr.ip().is_loopback())
        .unwrap_or(false);
    if !loopback && caps.publish {
        tracing::warn!(
            target: "boardpress::http",
            bind = bind_addr,
            "publish_changes disabled on non-loopback bind"
        );
        caps.publish = false;
    }
    caps
}

fn list_articles(backend: Backend, site_root: Option<PathBuf>) -> Result<()> {
    let store = build_store(backend, site_root)?;
    let rt = Runtime::new()?;
    let articles = rt.block_on(store.list())?;
    if articles.is_empty() {
        println!("(no articles)");
        return Ok(());
    }
    for article in articles {
        println!("{}  {:<32}  {}", article.date, article.slug, article.title);
    }
    Ok(())
}

fn print_tools(backend: Backend) -> Result<()> {
    let caps = match backend {
        Backend::File => FileStore::new(".").capabilities(),
        // The table backend offers article CRUD only.
        Backend::Table => StoreCapabilities::default(),
    };
    println!("{}", serde_json::to_string_pretty(&catalog::tools(caps))?);
    Ok(())
}
