//! Error types for the md2tex library.
//!
//! Two failure tiers reflect how a newsletter issue is actually built:
//!
//! * [`Md2TexError`] — **Fatal**: the issue cannot be generated at all
//!   (missing `config.yaml`, unwritable output directory). Returned as
//!   `Err(Md2TexError)` from the top-level generator functions.
//!
//! * **Record-level trouble** (a blurb that fails to parse, an article
//!   named in `article_order` that does not exist) is *not* fatal: the
//!   generator logs a warning and moves on, so one broken record never
//!   sinks a whole issue. Those conditions still use [`Md2TexError`]
//!   variants internally so callers of the record loaders get a precise
//!   cause.
//!
//! The markdown→LaTeX converter itself has no error type: conversion is
//! total over well-formed and malformed input alike (malformed constructs
//! degrade to literal passthrough).

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the md2tex library.
#[derive(Debug, Error)]
pub enum Md2TexError {
    // ── Workspace errors ──────────────────────────────────────────────────
    /// The issue configuration file was not found.
    #[error("Issue config not found: '{path}'\nExpected a config.yaml in the issue base directory.")]
    ConfigNotFound { path: PathBuf },

    /// The issue configuration exists but is not valid YAML.
    #[error("Failed to parse issue config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // ── Record errors ─────────────────────────────────────────────────────
    /// An article named in `article_order` has no YAML file on disk.
    #[error("Article '{name}' not found at '{path}'\nCheck article_order in config.yaml against content/articles/.")]
    ArticleNotFound { name: String, path: PathBuf },

    /// An article file exists but is not valid YAML.
    #[error("Failed to parse article '{name}': {source}")]
    ArticleParse {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// An organization blurb file exists but is not valid JSON.
    #[error("Failed to parse blurb for '{org}' at '{path}': {source}")]
    BlurbParse {
        org: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The events file exists but is not valid YAML.
    #[error("Failed to parse events file '{path}': {source}")]
    EventsParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not read a source file.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write a generated LaTeX file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
