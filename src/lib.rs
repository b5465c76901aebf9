//! Blazorgrab: fetch the client-side assemblies of a Blazor WebAssembly app.
//!
//! Blazorgrab resolves a published application's deployment layout in three
//! steps — the entry page's `<base>` path, the boot manifest URL derived
//! from it, and the exclusion-filtered resource list the manifest declares —
//! then downloads each retained resource sequentially into a local
//! directory.
//!
//! # Modules
//!
//! - [`resolve`]: target URL validation and deployment-path resolution
//! - [`boot`]: boot manifest model and exclusion filtering
//! - [`fetch`]: blocking HTTP client (timeout, optional proxy)
//! - [`download`]: output directory preparation and the download loop
//! - [`error`]: error types for blazorgrab operations

pub mod boot;
pub mod download;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod resolve;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::debug;
use url::Url;

pub use error::BlazorgrabError;

use boot::{BootManifest, ExcludeSet};
use fetch::Client;
use resolve::Target;

/// The blazorgrab CLI application.
#[derive(Parser)]
#[command(name = "blazorgrab")]
#[command(version, author, about)]
struct Cli {
    /// URL of the Blazor WebAssembly app's entry page.
    #[arg(short, long)]
    url: String,

    /// Directory the downloaded resources are written into.
    #[arg(short, long, default_value = "downloaded_dlls")]
    output_dir: PathBuf,

    /// Proxy URL applied to all requests (e.g. http://127.0.0.1:8080).
    #[arg(short, long)]
    proxy: Option<String>,

    /// Skip vendor assemblies (names matching Microsoft or System).
    #[arg(short = 'e', long, alias = "ex")]
    exclude: bool,

    /// Additional exclusion regex, matched anywhere in a resource name.
    #[arg(long, value_name = "REGEX")]
    exclude_pattern: Vec<String>,

    /// Treat a missing <base href> declaration as the root path '/'.
    #[arg(long)]
    assume_root_base: bool,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30, value_name = "SECONDS")]
    timeout: u64,
}

/// Immutable run configuration, derived once from the CLI arguments and
/// passed explicitly into each pipeline stage.
pub struct Config {
    pub url: Url,
    pub output_dir: PathBuf,
    pub proxy: Option<String>,
    pub exclude_patterns: Vec<String>,
    pub assume_root_base: bool,
    pub timeout: Duration,
}

impl Config {
    fn from_cli(cli: Cli) -> Result<Config, BlazorgrabError> {
        let url = resolve::parse_target_url(&cli.url)?;

        let mut exclude_patterns = Vec::new();
        if cli.exclude {
            exclude_patterns.extend(boot::VENDOR_EXCLUDE_PATTERNS.map(str::to_string));
        }
        exclude_patterns.extend(cli.exclude_pattern);

        Ok(Config {
            url,
            output_dir: cli.output_dir,
            proxy: cli.proxy,
            exclude_patterns,
            assume_root_base: cli.assume_root_base,
            timeout: Duration::from_secs(cli.timeout),
        })
    }
}

/// Run the blazorgrab CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), BlazorgrabError> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;
    run_with(&config)
}

/// Execute the full pipeline for an already-validated configuration.
pub fn run_with(config: &Config) -> Result<(), BlazorgrabError> {
    let client = Client::new(config.timeout, config.proxy.as_deref())?;
    let excludes = ExcludeSet::from_patterns(&config.exclude_patterns)?;

    println!("Fetching entry page {}", config.url);
    let entry_html =
        client
            .text(config.url.as_str())
            .map_err(|source| BlazorgrabError::EntryPageFetch {
                url: config.url.to_string(),
                message: source.to_string(),
            })?;

    let target = Target::resolve(&config.url, &entry_html, config.assume_root_base)?;
    debug!(base_path = target.base_path(), "resolved deployment path");

    let manifest_url = target.manifest_url();
    println!("Fetching boot manifest {manifest_url}");
    let manifest_body =
        client
            .text(&manifest_url)
            .map_err(|source| BlazorgrabError::ManifestFetch {
                url: manifest_url.clone(),
                message: source.to_string(),
            })?;
    let manifest =
        BootManifest::parse(&manifest_body).map_err(|source| BlazorgrabError::ManifestParse {
            url: manifest_url.clone(),
            source,
        })?;

    let names = manifest.assembly_names(&excludes);
    if !excludes.is_empty() {
        debug!(retained = names.len(), "applied exclusion patterns");
    }
    if names.is_empty() {
        println!("No assembly resources to download after filtering.");
        return Ok(());
    }

    download::prepare_output_dir(&config.output_dir)?;
    println!(
        "Downloading {} resources into {}",
        names.len(),
        config.output_dir.display()
    );
    let report = download::download_resources(&client, &target, &names, &config.output_dir);

    println!(
        "Done: {} downloaded, {} failed",
        report.downloaded.len(),
        report.failures.len()
    );
    if !report.failures.is_empty() {
        return Err(BlazorgrabError::DownloadsFailed {
            failed: report.failures.len(),
            total: names.len(),
        });
    }
    Ok(())
}
