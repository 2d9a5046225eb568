use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use conf2nix::options::{NoValueMode, RenderOptions};
use conf2nix::{parser, Evaluator, NixRenderer};

/// Render an evaluated Kconfig configuration tree as a Nix expression
#[derive(Debug, Parser)]
#[command(name = "conf2nix", version, about)]
struct Cli {
    /// Configuration tree dump (JSON) exported by the Kconfig evaluator
    config: PathBuf,

    /// Output file, default stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// How disabled symbols are rendered: none, unset or no
    #[arg(long, value_name = "MODE")]
    output_n: Option<String>,

    /// Do not report overridden symbols missing from the output
    #[arg(long)]
    no_warn_unused: bool,

    /// Render menus that are currently invisible
    #[arg(long)]
    include_invisible: bool,

    /// Annotate entries and section labels with their prompts
    #[arg(long)]
    breadcrumbs: bool,

    /// Add comments to distinguish string/hex/int entries
    #[arg(short, long)]
    type_comment: bool,

    /// Emit freeform entries whose payload is empty
    #[arg(long)]
    emit_empty_strings: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let options = resolve_options(&cli);

    let config = parser::load_config(&cli.config)?;
    let mut eval = Evaluator::new(config);
    let passes = eval.stabilize();
    debug!("stabilized symbol values in {passes} passes");

    let rendered = NixRenderer::new(&eval, &options).render();

    let mut output: Box<dyn Write> = match &cli.output {
        None => Box::new(stdout().lock()),
        Some(path) => Box::new(BufWriter::new(
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .with_context(|| format!("failed to open {path:?}"))?,
        )),
    };
    // a truncated document is worse than none at all, so any sink failure
    // aborts instead of retrying
    output
        .write_all(rendered.text.as_bytes())
        .and_then(|()| output.flush())
        .context("failed to write output")?;

    Ok(())
}

fn init_tracing() {
    // diagnostics go to stderr, never into the rendered document
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("conf2nix=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Flags win over environment variables; unparseable environment payloads
/// fall back to the documented default with a warning.
fn resolve_options(cli: &Cli) -> RenderOptions {
    let mut options = RenderOptions::default();

    let output_n = cli
        .output_n
        .clone()
        .or_else(|| std::env::var("CONF2NIX_OUTPUT_N").ok());
    if let Some(raw) = output_n {
        match NoValueMode::parse(&raw) {
            Some(mode) => options.no_value_mode = mode,
            None => warn!("failed to parse CONF2NIX_OUTPUT_N: '{raw}', [none|unset|no] required"),
        }
    }

    if cli.no_warn_unused {
        options.warn_unused = false;
    } else if let Ok(raw) = std::env::var("CONF2NIX_WARN_UNUSED") {
        match raw.as_str() {
            "1" => options.warn_unused = true,
            "0" => options.warn_unused = false,
            _ => warn!("failed to parse CONF2NIX_WARN_UNUSED: '{raw}', [0|1] required"),
        }
    }

    options.skip_invisible = !cli.include_invisible;
    options.breadcrumbs = cli.breadcrumbs;
    options.type_comments = cli.type_comment;
    options.emit_empty_strings = cli.emit_empty_strings;
    options
}
