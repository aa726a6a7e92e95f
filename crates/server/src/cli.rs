use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Storage backend selection.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum Backend {
    /// Front-matter markdown files under the site checkout.
    #[default]
    File,
    /// Hosted relational table over HTTPS.
    Table,
}

/// Command-line interface for the `boardpress` gateway.
#[derive(Debug, Parser)]
#[command(
    name = "boardpress",
    about = "MCP content gateway for the boardpress website"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available `boardpress` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Runs the gateway as an MCP server over stdio, or over HTTP with `--http`.
    Serve {
        /// Storage backend for article records.
        #[arg(long, value_enum, default_value = "file")]
        backend: Backend,
        /// Root of the site checkout (file backend).
        #[arg(long, env = "BOARDPRESS_SITE_ROOT", value_name = "DIR")]
        site_root: Option<PathBuf>,
        /// Bind address for the HTTP transport instead of stdio (e.g. 127.0.0.1:8787).
        #[arg(long, env = "BOARDPRESS_HTTP", value_name = "ADDR")]
        http: Option<String>,
    },
    /// Lists stored articles (debug).
    List {
        /// Storage backend for article records.
        #[arg(long, value_enum, default_value = "file")]
        backend: Backend,
        /// Root of the site checkout (file backend).
        #[arg(long, env = "BOARDPRESS_SITE_ROOT", value_name = "DIR")]
        site_root: Option<PathBuf>,
    },
    /// Prints the advertised tool catalog as JSON (debug).
    Tools {
        /// Storage backend whose catalog to print.
        #[arg(long, value_enum, default_value = "file")]
        backend: Backend,
    },
}
