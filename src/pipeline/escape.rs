//! Literal escaping: rewrite LaTeX-reserved characters into safe forms.
//!
//! ## Why payloads move to side tables first
//!
//! URLs and image paths are machine-consumed: `\%` inside an `\href` or a
//! QR payload is a different address than `%`. Before the character sweep
//! runs, every link and image token's payload is pulled out into
//! [`SideTables`] and replaced by an indexed reference token, so the sweep
//! physically cannot touch them. This makes the exemption part of the data
//! model instead of an accident of rule ordering.
//!
//! The sweep itself is a single linear pass. A reserved character that is
//! already preceded by a backslash is left alone, which makes the pass
//! idempotent: running escaped output through the escaper again changes
//! nothing.
//!
//! This phase cannot fail; empty input yields empty output.

use super::{SideTables, DELIM, SEP};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_LINK_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{DELIM}LINK:(.+?){SEP}(.+?){DELIM}")).unwrap());
static RE_IMAGE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{DELIM}IMG:(.+?){DELIM}")).unwrap());

/// Escape reserved characters in tokenised text, shielding link and image
/// payloads.
///
/// Returns the escaped text plus the side tables the resolver consumes.
pub fn escape(text: &str) -> (String, SideTables) {
    let mut tables = SideTables::default();

    let t = RE_LINK_TOKEN.replace_all(text, |caps: &Captures<'_>| {
        tables.links.push((caps[1].to_string(), caps[2].to_string()));
        format!("{DELIM}HREF{}{DELIM}", tables.links.len() - 1)
    });
    let t = RE_IMAGE_TOKEN.replace_all(&t, |caps: &Captures<'_>| {
        tables.images.push(caps[1].to_string());
        format!("{DELIM}IMGREF{}{DELIM}", tables.images.len() - 1)
    });

    (escape_literals(&t), tables)
}

/// Escape LaTeX-reserved characters in plain text.
///
/// For titles, author names and other strings that never contain markdown
/// constructs: the same substitution table as the pipeline sweep, with no
/// token awareness and no exceptions. Never run markup-bearing content
/// through this directly; use [`crate::markdown_to_latex`] instead so links
/// and images keep their raw payloads.
pub fn escape_plain(text: &str) -> String {
    escape_literals(text)
}

/// The reserved-character sweep shared by [`escape`] and [`escape_plain`].
///
/// `{& % $ # _}` gain a leading backslash; `{| ~ ^}` need the longer
/// `\text...{}` commands because their backslashed forms mean something
/// else in LaTeX. Substitution order does not matter: no literal form
/// contains an unescaped reserved character.
fn escape_literals(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut prev = '\0';

    for c in text.chars() {
        let bare = prev != '\\';
        match c {
            '&' | '%' | '$' | '#' | '_' if bare => {
                out.push('\\');
                out.push(c);
            }
            '|' if bare => out.push_str("\\textbar{}"),
            '~' if bare => out.push_str("\\textasciitilde{}"),
            '^' if bare => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
        prev = c;
    }

    out
}
