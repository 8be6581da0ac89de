// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Store configuration CLI
//!
//! Loads a `server.xml`, stores it back through the descriptor registry and
//! reports what the store engine could not describe.
//!
//! # Usage
//!
//! ```bash
//! # Re-render a configuration to stdout
//! storeconfig render conf/server.xml
//!
//! # Rewrite in place (previous file kept as a timestamped backup)
//! storeconfig render conf/server.xml -o conf/server.xml
//!
//! # Extra descriptions and output options from TOML
//! storeconfig render conf/server.xml --config store.toml
//!
//! # Verify that storing and reloading preserves the tree
//! storeconfig check conf/server.xml
//!
//! # List registered descriptions
//! storeconfig descriptors
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use storeconfig::{
    ServerLoader, StoreConfig, StoreConfigFile, StoreOptions, StoreRegistry, StoreReport,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storeconfig")]
#[command(about = "Store a server component tree back to server.xml")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a server.xml and store it again
    Render {
        /// Input server.xml
        input: PathBuf,

        /// Store configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Do not keep a backup of the replaced file
        #[arg(long)]
        no_backup: bool,
    },

    /// Check that storing and reloading a server.xml preserves it
    Check {
        /// Input server.xml
        input: PathBuf,

        /// Store configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List registered store descriptions
    Descriptors {
        /// Store configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate an example store configuration file
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "store.toml")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Render {
            input,
            config,
            output,
            no_backup,
        } => cmd_render(&input, config.as_deref(), output.as_deref(), no_backup),
        Commands::Check { input, config } => cmd_check(&input, config.as_deref()),
        Commands::Descriptors { config } => cmd_descriptors(config.as_deref()),
        Commands::GenConfig { output } => cmd_gen_config(&output),
    }
}

/// Default registry plus whatever the configuration file adds.
fn build_store(config: Option<&Path>) -> anyhow::Result<StoreConfig> {
    let registry = StoreRegistry::with_defaults();
    let options = match config {
        Some(path) => {
            let file = StoreConfigFile::from_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            file.apply(&registry);
            tracing::info!(
                path = %path.display(),
                descriptors = file.descriptors.len(),
                "store configuration loaded"
            );
            file.store
        }
        None => StoreOptions::default(),
    };
    Ok(StoreConfig::new(Arc::new(registry), options))
}

fn cmd_render(
    input: &Path,
    config: Option<&Path>,
    output: Option<&Path>,
    no_backup: bool,
) -> anyhow::Result<()> {
    let server = ServerLoader::load_from_file(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let mut store = build_store(config)?;
    if no_backup {
        let mut options = store.options().clone();
        options.backup = false;
        store = StoreConfig::new(Arc::clone(store.registry()), options);
    }

    let report = match output {
        Some(path) => {
            let report = store
                .store_to_file(&server, path)
                .with_context(|| format!("Failed to store {}", path.display()))?;
            eprintln!("[OK] Stored {} ({} bytes)", path.display(), report.bytes_written);
            if let Some(backup) = &report.backup {
                eprintln!("     Backup: {}", backup.display());
            }
            report
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let report = store.store_configuration(&server, &mut out)?;
            out.flush()?;
            report
        }
    };

    print_warnings(&report);
    Ok(())
}

fn cmd_check(input: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let server = ServerLoader::load_from_file(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let store = build_store(config)?;

    let (xml, report) = store.store_to_string(&server)?;
    let reloaded = ServerLoader::parse_xml(&xml).context("Stored document does not parse")?;
    print_warnings(&report);

    if reloaded != server {
        bail!(
            "Round-trip mismatch for {}: the stored document does not load back to the same tree",
            input.display()
        );
    }

    println!(
        "[OK] Round-trip preserved {} ({} warnings)",
        input.display(),
        report.warning_count()
    );
    Ok(())
}

fn cmd_descriptors(config: Option<&Path>) -> anyhow::Result<()> {
    let store = build_store(config)?;
    let mut descriptions = store.registry().descriptions();
    descriptions.sort_by_key(|d| d.key());

    for desc in descriptions {
        println!(
            "{:<70} <{}> {}{}",
            desc.key(),
            desc.tag,
            desc.strategy.as_str(),
            if desc.standard { "" } else { " (className)" }
        );
    }
    Ok(())
}

fn cmd_gen_config(output: &Path) -> anyhow::Result<()> {
    let text = StoreConfigFile::example().to_toml_string()?;
    std::fs::write(output, text)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Generated example configuration: {}", output.display());
    Ok(())
}

fn print_warnings(report: &StoreReport) {
    if report.is_clean() {
        return;
    }
    eprintln!("{} warnings:", report.warning_count());
    for (idx, diag) in report.diagnostics.iter().enumerate() {
        eprintln!("  {}. [{}] {}", idx + 1, diag.key.id(), diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Server port="8015">
  <Service name="Catalina">
    <Connector port="8080" protocol="HTTP/1.1"/>
    <Engine name="Catalina">
      <Host name="localhost">
        <Context path="/app" docBase="app">
          <WrapperLifecycle>a.Listener1</WrapperLifecycle>
        </Context>
      </Host>
    </Engine>
  </Service>
</Server>
"#;

    #[test]
    fn test_render_to_file_and_check() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("server.xml");
        std::fs::write(&input, SERVER_XML).unwrap();
        let output = dir.path().join("out").join("server.xml");

        cmd_render(&input, None, Some(&output), true).unwrap();
        assert_eq!(
            ServerLoader::load_from_file(&output).unwrap(),
            ServerLoader::parse_xml(SERVER_XML).unwrap()
        );
        cmd_check(&output, None).unwrap();
    }

    #[test]
    fn test_gen_config_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.toml");
        cmd_gen_config(&path).unwrap();

        let store = build_store(Some(&path)).unwrap();
        assert!(store
            .registry()
            .find_description("com.example.AuditListener")
            .is_some());
    }

    #[test]
    fn test_missing_config_is_reported() {
        let err = build_store(Some(Path::new("/nonexistent/store.toml"))).unwrap_err();
        assert!(err.to_string().contains("store.toml"));
    }
}
