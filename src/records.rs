//! Typed record contracts for the content tree of one issue.
//!
//! An issue base directory looks like:
//!
//! ```text
//! <base>/
//!   config.yaml            issue metadata + article/directory ordering
//!   events.yaml            upcoming events (optional)
//!   content/articles/*.yaml   one article per file
//!   content/blurb/*.json      one organization blurb per file
//!   logo/*.{png,jpg,jpeg}     directory logos (optional)
//! ```
//!
//! The upstream data is hand-edited YAML and API-dumped JSON, so every
//! field is tolerant: missing titles become "Untitled", a lone author
//! string is accepted where a list is expected, and meeting times arrive
//! either as minutes-since-midnight integers or as preformatted strings.

use crate::error::Md2TexError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

// ── Issue config ─────────────────────────────────────────────────────────

/// The `config.yaml` at the root of an issue directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueConfig {
    #[serde(default)]
    pub volume: Option<u32>,
    #[serde(default)]
    pub issue: Option<u32>,
    /// Article name rendered as the standalone letter page.
    #[serde(default)]
    pub letter_from_the_chair: Option<String>,
    /// Articles in print order; also drives the table of contents.
    #[serde(default)]
    pub article_order: Vec<String>,
    /// Organizations in directory order.
    #[serde(default)]
    pub directory_order: Vec<String>,
}

/// Load `config.yaml` from the issue base directory.
pub fn load_issue_config(base: &Path) -> Result<IssueConfig, Md2TexError> {
    let path = base.join("config.yaml");
    let raw = std::fs::read_to_string(&path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            Md2TexError::ConfigNotFound { path: path.clone() }
        } else {
            Md2TexError::ReadFailed {
                path: path.clone(),
                source,
            }
        }
    })?;
    serde_yaml::from_str(&raw).map_err(|source| Md2TexError::ConfigParse { path, source })
}

// ── Articles ─────────────────────────────────────────────────────────────

/// One article YAML under `content/articles/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    /// Accepts both `author:` and `authors:`, as a string or a list.
    #[serde(default, alias = "authors")]
    pub author: Authors,
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    /// Trimmed title, defaulting to "Untitled".
    pub fn display_title(&self) -> String {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("Untitled")
            .to_string()
    }

    /// Author names as a list; empty when none were given.
    pub fn author_names(&self) -> Vec<String> {
        self.author.to_vec()
    }

    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// A single author string or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Authors {
    One(String),
    Many(Vec<String>),
}

impl Default for Authors {
    fn default() -> Self {
        Authors::Many(Vec::new())
    }
}

impl Authors {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Authors::One(name) => vec![name.clone()],
            Authors::Many(names) => names.clone(),
        }
    }
}

/// Load one article by name from `content/articles/<name>.yaml`.
pub fn load_article(base: &Path, name: &str) -> Result<Article, Md2TexError> {
    let path = base
        .join("content")
        .join("articles")
        .join(format!("{name}.yaml"));
    let raw = std::fs::read_to_string(&path).map_err(|_| Md2TexError::ArticleNotFound {
        name: name.to_string(),
        path: path.clone(),
    })?;
    serde_yaml::from_str(&raw).map_err(|source| Md2TexError::ArticleParse {
        name: name.to_string(),
        source,
    })
}

// ── Organization blurbs ──────────────────────────────────────────────────

/// One organization blurb JSON under `content/blurb/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Blurb {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub blurb: Option<String>,
    #[serde(default)]
    pub chairs: Vec<Chair>,
    #[serde(default)]
    pub meeting_times: Option<Vec<MeetingTime>>,
    #[serde(default)]
    pub website: Option<String>,
    /// Extra links keyed by source name ("discord", "instagram", …).
    /// BTreeMap gives deterministic alphabetical output order.
    #[serde(default)]
    pub links: BTreeMap<String, String>,
}

impl Blurb {
    /// Dormant orgs are hidden from the directory. Upstream data contains
    /// both the word and a recurring "dormat" typo; tolerate both.
    pub fn is_dormant(&self) -> bool {
        matches!(self.status.as_deref(), Some("dormant") | Some("dormat"))
    }

    pub fn blurb_str(&self) -> &str {
        self.blurb.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chair {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeetingTime {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<TimeValue>,
    #[serde(default)]
    pub end_time: Option<TimeValue>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Either minutes since midnight or an already-formatted string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    Minutes(u32),
    Text(String),
}

/// Normalize an organization name to its blurb filename stem: drop pipes,
/// spaces become underscores, runs of underscores collapse, lowercase.
pub fn normalize_org_name(org: &str) -> String {
    let mut normalized = org.replace('|', "").replace(' ', "_").to_lowercase();
    while normalized.contains("__") {
        normalized = normalized.replace("__", "_");
    }
    normalized.trim_matches('_').to_string()
}

/// Load an organization blurb, trying the normalized filename first and
/// the raw name as a fallback. Returns `Ok(None)` when no file exists.
pub fn load_blurb(base: &Path, org: &str) -> Result<Option<Blurb>, Md2TexError> {
    let blurb_dir = base.join("content").join("blurb");
    let candidates = [
        blurb_dir.join(format!("{}.json", normalize_org_name(org))),
        blurb_dir.join(format!("{org}.json")),
    ];

    for path in candidates {
        if path.exists() {
            return parse_blurb(&path, org).map(Some);
        }
    }
    debug!("no blurb file for '{org}'");
    Ok(None)
}

fn parse_blurb(path: &PathBuf, org: &str) -> Result<Blurb, Md2TexError> {
    let raw = std::fs::read_to_string(path).map_err(|source| Md2TexError::ReadFailed {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Md2TexError::BlurbParse {
        org: org.to_string(),
        path: path.clone(),
        source,
    })
}

// ── Events ───────────────────────────────────────────────────────────────

/// The optional `events.yaml` at the issue root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Events {
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Load `events.yaml`; a missing file means an empty event list, not an
/// error.
pub fn load_events(base: &Path) -> Result<Events, Md2TexError> {
    let path = base.join("events.yaml");
    if !path.exists() {
        return Ok(Events::default());
    }
    let raw = std::fs::read_to_string(&path).map_err(|source| Md2TexError::ReadFailed {
        path: path.clone(),
        source,
    })?;
    serde_yaml::from_str(&raw).map_err(|source| Md2TexError::EventsParse { path, source })
}
