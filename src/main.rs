//! blogmeta - SEO and social-sharing metadata for blog posts.

mod cli;
mod config;
mod content;
mod core;
mod logger;
mod seo;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Arc::new(SiteConfig::load(&cli)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    match &cli.command {
        Commands::Meta { slug, pretty } => {
            cli::meta::print_meta(&config, &runtime, slug.as_deref(), *pretty)
        }
        Commands::Head { slug } => cli::meta::print_head(&config, &runtime, slug.as_deref()),
        Commands::Check => cli::check::check_posts(&config),
        Commands::Serve { .. } => cli::serve::serve_site(Arc::clone(&config), &runtime),
    }
}
