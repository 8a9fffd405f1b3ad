//! jsdoc-stub server binary: thin CLI shell over the [`jsdoc_stub_server`] library crate.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use jsdoc_stub_core::load_config;
use jsdoc_stub_server::{run_stdio, ServerState};

/// JSDoc comment-stub server speaking line-delimited JSON-RPC on stdio.
#[derive(Parser)]
#[command(name = "jsdoc-stub-server", version, about, long_about = None)]
struct Cli {
    /// Project root holding `.jsdocstub.toml` (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,
}

fn main() {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jsdoc_stub=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let root = cli.root.unwrap_or_else(|| PathBuf::from("."));
    let config = load_config(&root);
    info!(root = %root.display(), ?config, "Loaded configuration");

    run_stdio(ServerState::new(config));
}
