//! Markdown article import: turn writer-submitted `.md` drafts into the
//! YAML records the issue generator consumes.
//!
//! Drafts carry a small header block:
//!
//! ```text
//! title: My Article
//! authors: ['First Author', 'Second Author']
//!
//! Markdown body...
//! ```
//!
//! Everything after the first blank line is the body, kept verbatim. The
//! `authors:` value is a Python-style list literal in the drafts we
//! receive; a bare string is accepted too.

use crate::error::Md2TexError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A parsed draft, ready to serialize as an article record.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDraft {
    pub title: String,
    pub authors: Vec<String>,
    pub content: String,
}

/// Parse a draft's header block and body.
///
/// Missing fields fall back to "Untitled" / "Unknown" rather than failing;
/// a draft with no recognisable header at all still imports as a body-only
/// article.
pub fn parse_draft(markdown: &str) -> ParsedDraft {
    let lines: Vec<&str> = markdown.trim().split('\n').collect();

    let mut title: Option<String> = None;
    let mut authors: Vec<String> = Vec::new();
    let mut content_start = 0usize;

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if let Some(rest) = line.strip_prefix("title:") {
            title = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("authors:") {
            authors = parse_author_list(rest.trim());
        } else if line.is_empty() && i > 0 {
            content_start = i + 1;
            break;
        } else if i > 5 {
            // No blank separator within the first lines; assume the
            // header is over and this line starts the body.
            content_start = i;
            break;
        }
    }

    let content = lines[content_start..].join("\n").trim().to_string();

    ParsedDraft {
        title: title.filter(|t| !t.is_empty()).unwrap_or_else(|| "Untitled".into()),
        authors: if authors.is_empty() {
            vec!["Unknown".into()]
        } else {
            authors
        },
        content,
    }
}

/// Accepts `['A', 'B']`, `["A"]`, or a bare `A` string.
fn parse_author_list(value: &str) -> Vec<String> {
    let inner = value.trim().trim_start_matches('[').trim_end_matches(']');
    inner
        .split(',')
        .map(|part| part.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Serialize a parsed draft in the article YAML layout: block-indented
/// title, author list, and a literal block scalar for the body.
pub fn draft_to_yaml(draft: &ParsedDraft) -> String {
    let mut out = Vec::new();
    out.push("title:".to_string());
    out.push(format!("  {}", draft.title));

    out.push("author:".to_string());
    for author in &draft.authors {
        out.push(format!("  - {author}"));
    }
    out.push(String::new());

    out.push("content: |".to_string());
    if draft.content.is_empty() {
        out.push("  (No content)".to_string());
    } else {
        for line in draft.content.split('\n') {
            out.push(format!("  {line}"));
        }
    }
    out.push(String::new());

    out.join("\n")
}

/// Import every `<base>/articles/*.md` draft into
/// `<base>/content/articles/<stem>.yaml`. Returns the number of drafts
/// converted; individual failures are logged and skipped.
pub fn import_articles(base_dir: &Path) -> Result<usize, Md2TexError> {
    let input_dir = base_dir.join("articles");
    let output_dir = base_dir.join("content").join("articles");

    let entries = std::fs::read_dir(&input_dir).map_err(|source| Md2TexError::ReadFailed {
        path: input_dir.clone(),
        source,
    })?;
    std::fs::create_dir_all(&output_dir).map_err(|source| Md2TexError::OutputWriteFailed {
        path: output_dir.clone(),
        source,
    })?;

    let mut drafts: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    drafts.sort();

    let mut converted = 0usize;
    for path in drafts {
        let markdown = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping unreadable draft");
                continue;
            }
        };
        let draft = parse_draft(&markdown);

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let out_path = output_dir.join(format!("{stem}.yaml"));
        std::fs::write(&out_path, draft_to_yaml(&draft)).map_err(|source| {
            Md2TexError::OutputWriteFailed {
                path: out_path.clone(),
                source,
            }
        })?;
        info!(from = %path.display(), to = %out_path.display(), "imported draft");
        converted += 1;
    }
    Ok(converted)
}
