//! Structural extraction: replace recognised markdown constructs with
//! opaque tokens.
//!
//! ## Rule Order
//!
//! The passes must run in this specific order, because later passes match
//! syntax that overlaps earlier constructs:
//!
//! 1. Explicit `<br>` line breaks — before anything touches the text
//! 2. Headers, most-specific first (`###` before `##` before `#`) so a
//!    level-3 line is never half-eaten by the level-1 rule
//! 3. Bold (`**…**`) before italic (`*…*`), otherwise one bold span reads
//!    as two italics
//! 4. Italic
//! 5. Images before links — image syntax is link syntax prefixed by `!`
//! 6. Links
//! 7. Bullet lists, on the line level, wrapping contiguous runs
//!
//! Emphasis, link and image spans match non-greedily so adjacent
//! constructs on one line do not merge. Anything malformed (unterminated
//! span, missing bracket) simply fails to match and passes through as
//! literal text; this stage never fails.

use super::{DELIM, SEP};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_LINEBREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static RE_H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.+)$").unwrap());
static RE_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.+)$").unwrap());
static RE_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());
static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[*-]\s+").unwrap());

/// Tokenise all structural and inline constructs in `text`.
///
/// Returns the text with every recognised construct replaced by a
/// delimiter-framed token. Link and image payloads stay inline at this
/// point; the escaping stage moves them into side tables.
pub fn extract(text: &str) -> String {
    let t = RE_LINEBREAK.replace_all(text, format!("{DELIM}BR{DELIM}"));
    let t = RE_H3.replace_all(&t, format!("{DELIM}SUBSUB:${{1}}{DELIM}"));
    let t = RE_H2.replace_all(&t, format!("{DELIM}SUB:${{1}}{DELIM}"));
    let t = RE_H1.replace_all(&t, format!("{DELIM}SEC:${{1}}{DELIM}"));
    let t = RE_BOLD.replace_all(&t, format!("{DELIM}BOLD:${{1}}{DELIM}"));
    let t = RE_ITALIC.replace_all(&t, format!("{DELIM}ITALIC:${{1}}{DELIM}"));
    let t = RE_IMAGE.replace_all(&t, |caps: &Captures<'_>| {
        // Alt text is dropped; captions are written as italic text after
        // the image in the source markdown instead.
        let raw = &caps[2];
        let path = raw.strip_prefix("./").unwrap_or(raw);
        format!("{DELIM}IMG:{path}{DELIM}")
    });
    let t = RE_LINK.replace_all(&t, format!("{DELIM}LINK:${{1}}{SEP}${{2}}{DELIM}"));
    wrap_lists(&t)
}

/// Wrap contiguous runs of bullet lines in list begin/end tokens.
///
/// A run ends at the first non-bullet line or at end of text; a run still
/// open at end of text is closed implicitly.
fn wrap_lists(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_list = false;

    for line in text.split('\n') {
        if RE_BULLET.is_match(line) {
            if !in_list {
                out.push(format!("{DELIM}LISTBEGIN{DELIM}"));
                in_list = true;
            }
            let item = RE_BULLET.replace(line, "");
            out.push(format!("{DELIM}ITEM:{item}{DELIM}"));
        } else {
            if in_list {
                out.push(format!("{DELIM}LISTEND{DELIM}"));
                in_list = false;
            }
            out.push(line.to_string());
        }
    }
    if in_list {
        out.push(format!("{DELIM}LISTEND{DELIM}"));
    }

    out.join("\n")
}
