//! Corral CLI
//!
//! Confines a stylesheet to the preview container and reports the
//! detected background color and chrome mode. A debugging tool for theme
//! authors and for inspecting what the previewer will actually attach.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;

use corral_confine::{
    ConfinePolicy, DEFAULT_MAX_DEPTH, LayoutPropertySet, extract_background_color,
    scope_with_policy, strip_layout_properties, strip_print_rules,
};
use corral_loader::ThemeMode;
use corral_loader::fetch::fetch_text;

/// Command-line options.
#[derive(Parser)]
#[command(name = "corral", about = "Confine third-party CSS to the preview container")]
struct Cli {
    /// Stylesheet file to confine; reads stdin when omitted
    input: Option<PathBuf>,

    /// Fetch the stylesheet from a URL instead of a file
    #[arg(long, conflicts_with = "input")]
    url: Option<String>,

    /// Confinement root selector
    #[arg(long, default_value = "#wrapper")]
    root: String,

    /// Recursion ceiling for nested grouping at-rules
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Keep host-reserved layout properties on the root rule
    #[arg(long)]
    no_strip: bool,

    /// Drop `@media print` blocks
    #[arg(long)]
    strip_print: bool,

    /// Print only the detected background color and chrome mode
    #[arg(long)]
    color_only: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let css = match (&cli.input, &cli.url) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, Some(url)) => fetch_text(url).with_context(|| format!("failed to fetch {url}"))?,
        (None, None) => {
            let mut buf = String::new();
            let _ = std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let policy = ConfinePolicy {
        max_depth: cli.max_depth,
        ..ConfinePolicy::with_root(&cli.root)
    };

    let mut confined = scope_with_policy(&css, &policy);
    if cli.strip_print {
        confined = strip_print_rules(&confined, policy.max_depth);
    }
    if !cli.no_strip {
        confined = strip_layout_properties(
            &confined,
            &policy.root,
            &LayoutPropertySet::default(),
            policy.max_depth,
        );
    }

    let background = extract_background_color(&confined, &policy.root);
    let mode = ThemeMode::from_background(background.as_deref());

    if cli.color_only {
        match &background {
            Some(color) => println!("{color} ({mode:?})"),
            None => println!("no color found ({mode:?})"),
        }
        return Ok(());
    }

    println!("{confined}");

    eprintln!(
        "{} {} -> {} bytes, background {}, {} chrome",
        "confined".green().bold(),
        css.len(),
        confined.len(),
        background.as_deref().unwrap_or("not found").yellow(),
        format!("{mode:?}").to_lowercase().cyan(),
    );

    Ok(())
}
