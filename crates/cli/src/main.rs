//! Command-line interface for the `boardpress` gateway.
//!
//! This crate serves as the main entry point for the executable, delegating
//! its core functionality to the `boardpress-server` crate.

fn main() -> anyhow::Result<()> {
    boardpress_server::run()
}
