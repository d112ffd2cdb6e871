// src/main.rs
//
// introgen — personal introduction page generator
//
// - Reads a TOML profile and renders it as a complete HTML introduction
//   page or as a flat JSON document.
// - Generated HTML is passed through a width-aware reflow that breaks
//   long tag lines at attribute boundaries and long text lines at word
//   boundaries, preserving indentation.
//
// CLI flags:
//   --json / --html : force the output format
//   --width N       : maximum line width for generated HTML (default 100)
//   --no-wrap       : skip the reflow pass
// Default: JSON is emitted iff the output file extension is ".json"
// (case-insensitive), HTML otherwise.

use anyhow::Context;
use clap::{ArgAction, Parser};
use introgen::{html, json, wrap, Profile};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Force JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Force HTML output
    #[arg(long, action = ArgAction::SetTrue)]
    html: bool,

    /// Maximum line width for the generated HTML
    #[arg(long, default_value_t = wrap::DEFAULT_MAX_WIDTH)]
    width: usize,

    /// Emit the generated HTML without the reflow pass
    #[arg(long = "no-wrap", action = ArgAction::SetTrue)]
    no_wrap: bool,

    /// Input profile (TOML)
    input: PathBuf,

    /// Output file (default: stdout)
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let profile = Profile::load(&cli.input)?;
    debug!(path = %cli.input.display(), "profile loaded");

    // Default: emit JSON if the output file ends with ".json"
    let default_json = cli
        .output
        .as_ref()
        .and_then(|p| p.extension())
        .map_or(false, |e| e.to_string_lossy().eq_ignore_ascii_case("json"));

    // Precedence: explicit flags override the default; --html wins if both are present.
    let emit_json = if cli.html {
        false
    } else if cli.json {
        true
    } else {
        default_json
    };

    let mut doc = if emit_json {
        json::render(&profile).context("serializing the JSON document")?
    } else {
        let page = html::render(&profile);
        if cli.no_wrap {
            page
        } else {
            debug!(width = cli.width, "reflowing generated markup");
            wrap::wrap(&page, cli.width)
        }
    };
    if !doc.ends_with('\n') {
        doc.push('\n');
    }

    match &cli.output {
        Some(path) => {
            fs::write(path, &doc).with_context(|| format!("writing {}", path.display()))?;
        }
        None => io::stdout().write_all(doc.as_bytes())?,
    }
    Ok(())
}
