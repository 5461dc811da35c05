//! CLI binary for md2tex.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `RenderConfig` and runs issue generation or article import.

use anyhow::{Context, Result};
use clap::Parser;
use md2tex::{import_articles, IssueGenerator, PresentationMode, RenderConfig};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Generate all LaTeX fragments for an issue (online mode, \href links)
  md2tex issues/43-1

  # Print mode: article links become QR codes, directory URLs stay plain
  md2tex --print-mode issues/43-1

  # Write fragments somewhere other than <base>/content
  md2tex issues/43-1 -o build/fragments

  # Import writer-submitted markdown drafts into article YAML records
  md2tex --import-articles issues/43-1

  # Validate an issue without writing anything
  md2tex --check issues/43-1

ISSUE DIRECTORY LAYOUT:
  <base>/
    config.yaml               issue metadata, article_order, directory_order
    events.yaml               upcoming events (optional)
    articles/*.md             raw drafts (input to --import-articles)
    content/articles/*.yaml   article records (input to generation)
    content/blurb/*.json      organization blurbs for the directory
    logo/*.{png,jpg,jpeg}     directory logos (optional)

GENERATED FILES (in the output directory):
  toc.tex        table of contents with \pageref entries
  events.tex     upcoming-events panel
  letter.tex     letter from the chair
  articles.tex   all articles in print order
  directory.tex  two-column organization directory

NEXT STEPS:
  1. Review the generated .tex fragments
  2. Compile the issue:  pdflatex main.tex
"#;

/// Generate newsletter LaTeX fragments from markdown/YAML/JSON content.
#[derive(Parser, Debug)]
#[command(
    name = "md2tex",
    version,
    about = "Generate newsletter LaTeX fragments from markdown content",
    long_about = "Convert an issue's markdown articles, organization blurbs, and event \
listings into the LaTeX fragment files the newsletter class inputs. Markdown prose is \
escaped for LaTeX; URLs and image paths pass through verbatim; in print mode article \
hyperlinks become scannable QR codes.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Issue base directory (contains config.yaml).
    base_dir: PathBuf,

    /// Output directory for generated .tex files [default: <base>/content].
    #[arg(short, long, env = "MD2TEX_OUTPUT")]
    output: Option<PathBuf>,

    /// Render for print: QR codes for article links, plain URLs in the
    /// directory.
    #[arg(long, env = "MD2TEX_PRINT_MODE")]
    print_mode: bool,

    /// Convert articles/*.md drafts into content/articles/*.yaml and exit.
    #[arg(long)]
    import_articles: bool,

    /// Load and render everything but write nothing.
    #[arg(long)]
    check: bool,

    /// Verbose logging (debug level).
    #[arg(short, long, env = "MD2TEX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2TEX_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.import_articles {
        let count = import_articles(&cli.base_dir).with_context(|| {
            format!(
                "failed to import drafts from '{}/articles'",
                cli.base_dir.display()
            )
        })?;
        if !cli.quiet {
            eprintln!("✓ Imported {count} draft(s) into content/articles/");
        }
        return Ok(());
    }

    let mode = if cli.print_mode {
        PresentationMode::Print
    } else {
        PresentationMode::Online
    };
    let config = RenderConfig::builder().mode(mode).build()?;

    let generator = IssueGenerator::open(&cli.base_dir, config)
        .with_context(|| format!("failed to open issue at '{}'", cli.base_dir.display()))?;

    if cli.check {
        // Render every fragment in memory so parse problems surface, but
        // leave the tree untouched.
        let fragments = [
            ("toc.tex", generator.toc_tex()),
            ("events.tex", generator.events_tex()?),
            ("letter.tex", generator.letter_tex()?),
            ("articles.tex", generator.articles_tex()),
            ("directory.tex", generator.directory_tex()),
        ];
        if !cli.quiet {
            for (name, tex) in &fragments {
                eprintln!("  {name:<14} {} bytes", tex.len());
            }
            eprintln!("✓ Issue checks out (nothing written)");
        }
        return Ok(());
    }

    let output_dir = cli
        .output
        .unwrap_or_else(|| cli.base_dir.join("content"));
    generator
        .generate_all(&output_dir)
        .with_context(|| format!("failed to generate into '{}'", output_dir.display()))?;

    if !cli.quiet {
        let mode_note = if cli.print_mode { " (print mode)" } else { "" };
        eprintln!("✓ All fragments generated in {}{mode_note}", output_dir.display());
    }
    Ok(())
}
