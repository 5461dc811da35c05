//! Token resolution: expand every token into final LaTeX.
//!
//! Tokens are non-overlapping by construction, so no containment ordering
//! is needed; resolution runs headers → emphasis → line breaks → link
//! references → image references → lists. Link references consult the
//! (presentation mode × is_article) decision table:
//!
//! | mode   | is_article | rendering                      |
//! |--------|------------|--------------------------------|
//! | Online | any        | `\href{url}{text}`             |
//! | Print  | false      | `\href{url}{text}`             |
//! | Print  | true       | QR block + small URL caption   |
//!
//! The QR payload must stay the exact literal URL (the scanner decodes it
//! byte-for-byte), while the caption shown under it gets its own display
//! escaping of `_`, `#` and `%`.
//!
//! No step here can fail on well-formed token input. An out-of-range side
//! table index means the extractor and resolver disagree about how many
//! links or images this text contains, which is a bug, not bad input — it
//! panics rather than emit garbage LaTeX.

use super::{SideTables, DELIM};
use crate::config::{PresentationMode, RenderConfig};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_SUBSUB: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{DELIM}SUBSUB:(.+?){DELIM}")).unwrap());
static RE_SUB: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("{DELIM}SUB:(.+?){DELIM}")).unwrap());
static RE_SEC: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("{DELIM}SEC:(.+?){DELIM}")).unwrap());
static RE_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{DELIM}BOLD:(.+?){DELIM}")).unwrap());
static RE_ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{DELIM}ITALIC:(.+?){DELIM}")).unwrap());
static RE_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{DELIM}HREF([0-9]+){DELIM}")).unwrap());
static RE_IMGREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{DELIM}IMGREF([0-9]+){DELIM}")).unwrap());
static RE_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{DELIM}ITEM:(.+?){DELIM}")).unwrap());

/// Expand all tokens in `text` into LaTeX fragments.
///
/// `is_article` selects the link-rendering policy together with
/// `config.mode` (articles get QR codes in print; directory blurbs and
/// other non-article content keep hyperlinks).
///
/// # Panics
///
/// Panics if a link or image reference index exceeds its side table. That
/// can only happen through extractor/resolver desynchronisation and must
/// surface as a crash rather than silently corrupt the issue.
pub fn resolve(text: &str, tables: &SideTables, is_article: bool, config: &RenderConfig) -> String {
    let t = RE_SUBSUB.replace_all(text, "\\subsubsection*{${1}}");
    let t = RE_SUB.replace_all(&t, "\\subsection*{${1}}");
    let t = RE_SEC.replace_all(&t, "\\section*{${1}}");
    let t = RE_BOLD.replace_all(&t, "\\textbf{${1}}");
    let t = RE_ITALIC.replace_all(&t, "\\textit{${1}}");

    // \vspace instead of \\ because the fragment may land outside a
    // paragraph (e.g. right after a section heading), where \\ errors out.
    let t = t.replace(&format!("{DELIM}BR{DELIM}"), "\\vspace{0.5em}");

    let t = RE_HREF.replace_all(&t, |caps: &Captures<'_>| {
        let idx = parse_index(&caps[1]);
        let (display, url) = tables.links.get(idx).unwrap_or_else(|| {
            panic!(
                "link reference {idx} out of range ({} links extracted): \
                 extractor and resolver are desynchronised",
                tables.links.len()
            )
        });
        // # was shielded inside the side table, but undo any escaping a
        // caller may have baked into the record itself: URLs are machine
        // facts, not display text.
        let url = url.replace("\\#", "#");
        render_link(display, &url, is_article, config)
    });

    let t = RE_IMGREF.replace_all(&t, |caps: &Captures<'_>| {
        let idx = parse_index(&caps[1]);
        let path = tables.images.get(idx).unwrap_or_else(|| {
            panic!(
                "image reference {idx} out of range ({} images extracted): \
                 extractor and resolver are desynchronised",
                tables.images.len()
            )
        });
        format!(
            "\\begin{{center}}\\includegraphics[width=0.9\\columnwidth]{{./{}/{}}}\\end{{center}}",
            config.images_dir, path
        )
    });

    let t = t.replace(&format!("{DELIM}LISTBEGIN{DELIM}"), "\\begin{itemize}");
    let t = t.replace(&format!("{DELIM}LISTEND{DELIM}"), "\\end{itemize}");
    RE_ITEM.replace_all(&t, "\\item ${1}").into_owned()
}

fn parse_index(digits: &str) -> usize {
    // The pattern only admits [0-9]+; anything unparseable would itself be
    // a desynchronisation.
    digits
        .parse()
        .unwrap_or_else(|_| panic!("malformed reference index '{digits}'"))
}

/// The (mode × is_article) link decision table.
fn render_link(display: &str, url: &str, is_article: bool, config: &RenderConfig) -> String {
    if config.mode == PresentationMode::Print && is_article {
        let caption = url
            .replace('_', "\\_")
            .replace('#', "\\#")
            .replace('%', "\\%");
        format!(
            "\\begin{{center}}\
             \\begingroup\
             \\color{{black}}\
             \\qrcode[height=0.8in,hyperlink=false]{{{url}}}\
             \\endgroup\\\\\
             \\vspace{{0.15cm}}\
             {{\\small {caption}}}\
             \\end{{center}}"
        )
    } else {
        format!("\\href{{{url}}}{{{display}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn online() -> RenderConfig {
        RenderConfig::default()
    }

    fn print_mode() -> RenderConfig {
        RenderConfig::builder()
            .mode(PresentationMode::Print)
            .build()
            .unwrap()
    }

    fn no_tables() -> SideTables {
        SideTables::default()
    }

    #[test]
    fn headers_resolve_to_starred_sections() {
        let text = format!("{DELIM}SEC:Top{DELIM}\n{DELIM}SUBSUB:Deep{DELIM}");
        let out = resolve(&text, &no_tables(), false, &online());
        assert_eq!(out, "\\section*{Top}\n\\subsubsection*{Deep}");
    }

    #[test]
    fn emphasis_resolves_in_place() {
        let text = format!("{DELIM}BOLD:b{DELIM} and {DELIM}ITALIC:i{DELIM}");
        let out = resolve(&text, &no_tables(), false, &online());
        assert_eq!(out, "\\textbf{b} and \\textit{i}");
    }

    #[test]
    fn linebreak_becomes_vspace() {
        let text = format!("a{DELIM}BR{DELIM}b");
        let out = resolve(&text, &no_tables(), false, &online());
        assert_eq!(out, "a\\vspace{0.5em}b");
    }

    #[test]
    fn online_link_is_a_hyperlink() {
        let tables = SideTables {
            links: vec![("site".into(), "https://x.com/a_b".into())],
            images: vec![],
        };
        let text = format!("{DELIM}HREF0{DELIM}");
        let out = resolve(&text, &tables, true, &online());
        assert_eq!(out, "\\href{https://x.com/a_b}{site}");
    }

    #[test]
    fn print_article_link_becomes_qr_with_escaped_caption() {
        let tables = SideTables {
            links: vec![("site".into(), "http://x.com/a_b#c".into())],
            images: vec![],
        };
        let text = format!("{DELIM}HREF0{DELIM}");
        let out = resolve(&text, &tables, true, &print_mode());
        // Payload keeps the raw URL; caption escapes _ and #.
        assert!(out.contains("\\qrcode[height=0.8in,hyperlink=false]{http://x.com/a_b#c}"));
        assert!(out.contains("{\\small http://x.com/a\\_b\\#c}"));
        assert!(!out.contains("\\href"));
    }

    #[test]
    fn print_non_article_link_stays_a_hyperlink() {
        let tables = SideTables {
            links: vec![("site".into(), "https://x.com".into())],
            images: vec![],
        };
        let text = format!("{DELIM}HREF0{DELIM}");
        let out = resolve(&text, &tables, false, &print_mode());
        assert_eq!(out, "\\href{https://x.com}{site}");
    }

    #[test]
    fn image_joins_the_configured_images_directory() {
        let tables = SideTables {
            links: vec![],
            images: vec!["img/logo.png".into()],
        };
        let text = format!("{DELIM}IMGREF0{DELIM}");
        let out = resolve(&text, &tables, true, &online());
        assert_eq!(
            out,
            "\\begin{center}\\includegraphics[width=0.9\\columnwidth]{./articles/images/img/logo.png}\\end{center}"
        );
    }

    #[test]
    fn list_tokens_produce_an_itemize_environment() {
        let text = format!(
            "{DELIM}LISTBEGIN{DELIM}\n{DELIM}ITEM:a{DELIM}\n{DELIM}ITEM:b{DELIM}\n{DELIM}LISTEND{DELIM}"
        );
        let out = resolve(&text, &no_tables(), false, &online());
        assert_eq!(
            out,
            "\\begin{itemize}\n\\item a\n\\item b\n\\end{itemize}"
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_link_reference_panics() {
        let text = format!("{DELIM}HREF3{DELIM}");
        resolve(&text, &no_tables(), false, &online());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_image_reference_panics() {
        let text = format!("{DELIM}IMGREF0{DELIM}");
        resolve(&text, &no_tables(), false, &online());
    }
}
