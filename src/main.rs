//! Onepager - a terminal viewer for single-page markdown sites.
//!
//! # Usage
//!
//! ```bash
//! onepager page.md
//! onepager --watch page.md
//! onepager --nav page.md
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use onepager::app::App;
use onepager::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A terminal viewer for single-page markdown sites
#[derive(Parser, Debug)]
#[command(name = "onepager", version, about, long_about = None)]
struct Cli {
    /// Page file to view
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Watch file for changes and auto-reload
    #[arg(short, long)]
    watch: bool,

    /// Start with the navigation panel open
    #[arg(long)]
    nav: bool,

    /// Never open the navigation panel on startup
    #[arg(long)]
    no_nav: bool,

    /// Disable eased scrolling (anchor navigation jumps instantly)
    #[arg(long)]
    no_motion: bool,

    /// Save current command-line flags as defaults in .onepagerrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .onepagerrc
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // Verify file exists
    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    // Run the application
    let mut app = App::new(cli.file)
        .with_watch(effective.watch)
        .with_nav_open(effective.nav && !effective.no_nav)
        .with_motion(!effective.no_motion)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
