use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ldawt_generator::{DEFAULT_EXECUTION_SITE, GeneratorConfig, generate};

/// LDAWT - generate the split/download workflow and its catalogs for Pegasus
#[derive(Debug, Parser)]
#[command(name = "ldawt")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Skip site catalog creation
  #[arg(short = 's', long = "skip_sites_catalog")]
  skip_sites_catalog: bool,

  /// Execution site name
  #[arg(
    short = 'e',
    long = "execution_site_name",
    value_name = "STR",
    default_value = DEFAULT_EXECUTION_SITE
  )]
  execution_site_name: String,

  /// Output file
  #[arg(short = 'o', long = "output", value_name = "STR", default_value = "workflow.yml")]
  output: PathBuf,
}

impl Cli {
  fn into_config(self, work_dir: PathBuf) -> GeneratorConfig {
    GeneratorConfig::new(work_dir)
      .with_skip_sites_catalog(self.skip_sites_catalog)
      .with_execution_site(self.execution_site_name)
      .with_workflow_file(self.output)
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let work_dir = std::env::current_dir().context("failed to determine working directory")?;
  let config = cli.into_config(work_dir.clone());

  let artifacts = generate(&config).context("failed to generate workflow")?;
  let written = artifacts
    .write_all(&work_dir)
    .with_context(|| format!("failed to write artifacts to {}", work_dir.display()))?;

  info!(
    artifacts = written.len(),
    work_dir = %work_dir.display(),
    "workflow generated"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let cli = Cli::try_parse_from(["ldawt"]).unwrap();

    assert!(!cli.skip_sites_catalog);
    assert_eq!(cli.execution_site_name, "condorpool");
    assert_eq!(cli.output, PathBuf::from("workflow.yml"));
  }

  #[test]
  fn test_short_flags() {
    let cli = Cli::try_parse_from(["ldawt", "-s", "-e", "foo", "-o", "out.yml"]).unwrap();

    assert!(cli.skip_sites_catalog);
    assert_eq!(cli.execution_site_name, "foo");
    assert_eq!(cli.output, PathBuf::from("out.yml"));
  }

  #[test]
  fn test_long_flags_use_underscores() {
    let cli = Cli::try_parse_from([
      "ldawt",
      "--skip_sites_catalog",
      "--execution_site_name=foo",
      "--output",
      "out.yml",
    ])
    .unwrap();

    assert!(cli.skip_sites_catalog);
    assert_eq!(cli.execution_site_name, "foo");
  }

  #[test]
  fn test_rejects_unknown_flag() {
    assert!(Cli::try_parse_from(["ldawt", "--groups", "3"]).is_err());
  }

  #[test]
  fn test_into_config() {
    let cli = Cli::try_parse_from(["ldawt", "-s", "-e", "foo"]).unwrap();
    let config = cli.into_config(PathBuf::from("/work"));

    assert!(config.skip_sites_catalog);
    assert_eq!(config.execution_site, "foo");
    assert_eq!(config.work_dir, PathBuf::from("/work"));
  }
}
