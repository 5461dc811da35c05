//! # md2tex
//!
//! Convert writer-submitted Markdown into the LaTeX fragments of a
//! printable student newsletter.
//!
//! ## Why this crate?
//!
//! General markdown-to-LaTeX converters assume a document class they
//! control. A newsletter issue is the opposite: the class file fixes the
//! layout (bylines, two-column directory, article labels) and the
//! converter must emit fragments that slot into it, with every reserved
//! LaTeX character in prose escaped and every URL left untouched. This
//! crate does exactly that, plus the issue assembly around it.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Extract  structure → opaque tokens (headers, bold, links, lists)
//!  ├─ 2. Escape   reserved chars in prose; URLs/paths shielded in side tables
//!  ├─ 3. Resolve  tokens → LaTeX (\section*, \textbf, \href or QR blocks)
//!  │
//!  └─ Issue assembly: toc / letter / articles / events / directory .tex
//! ```
//!
//! The two escaping-sensitive payloads (link URLs, image paths) are parked
//! in side tables during the escape pass and re-joined afterwards, so a
//! URL like `https://x.com/a_b#c` survives verbatim while the prose around
//! it is escaped.
//!
//! ## Quick Start
//!
//! ```rust
//! use md2tex::{markdown_to_latex, RenderConfig};
//!
//! let config = RenderConfig::default();
//! let latex = markdown_to_latex("**50%** of [users](https://x.com/a_b) agree", false, &config);
//! assert_eq!(latex, "\\textbf{50\\%} of \\href{https://x.com/a_b}{users} agree");
//! ```
//!
//! Generating a full issue:
//!
//! ```rust,no_run
//! use md2tex::{IssueGenerator, PresentationMode, RenderConfig};
//!
//! fn main() -> Result<(), md2tex::Md2TexError> {
//!     let config = RenderConfig::builder()
//!         .mode(PresentationMode::Print)
//!         .build()?;
//!     let generator = IssueGenerator::open("issues/43-1", config)?;
//!     generator.generate_all(std::path::Path::new("issues/43-1/content"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2tex` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! md2tex = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod import;
pub mod issue;
pub mod pipeline;
pub mod records;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PresentationMode, RenderConfig, RenderConfigBuilder};
pub use convert::markdown_to_latex;
pub use error::Md2TexError;
pub use import::{import_articles, parse_draft, ParsedDraft};
pub use issue::IssueGenerator;
pub use pipeline::escape::escape_plain;
pub use records::{Article, Blurb, Chair, Event, Events, IssueConfig, MeetingTime};
