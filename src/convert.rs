//! Top-level conversion entry point.
//!
//! One call converts one markdown string to completion: the pipeline is
//! purely synchronous, allocates its side tables fresh per call, and keeps
//! no state across calls. Independent records (one article, one blurb)
//! may therefore be converted from any number of threads sharing a
//! `&RenderConfig`.

use crate::config::RenderConfig;
use crate::pipeline::{escape, extract, resolve};
use tracing::trace;

/// Convert newsletter markdown to a LaTeX fragment.
///
/// The supported dialect is deliberately small: `#`/`##`/`###` headers,
/// `**bold**`, `*italic*`, `<br>` breaks, `[text](url)` links,
/// `![alt](path)` images and `-`/`*` bullet lists. Everything else,
/// including malformed constructs, passes through with LaTeX-reserved
/// characters escaped. Tables, nested lists, code fences and blockquotes
/// are not recognised.
///
/// `is_article` marks content subject to the print-mode QR link policy;
/// pass `false` for directory blurbs and other auxiliary copy.
///
/// The returned fragment is safe to splice into a larger LaTeX document
/// without further escaping. Empty input yields an empty fragment.
///
/// # Example
/// ```rust
/// use md2tex::{markdown_to_latex, RenderConfig};
///
/// let config = RenderConfig::default();
/// let tex = markdown_to_latex("# Hello\n**100%** real", true, &config);
/// assert_eq!(tex, "\\section*{Hello}\n\\textbf{100\\%} real");
/// ```
pub fn markdown_to_latex(text: &str, is_article: bool, config: &RenderConfig) -> String {
    if text.is_empty() {
        return String::new();
    }

    let tokenised = extract::extract(text);
    let (escaped, tables) = escape::escape(&tokenised);
    trace!(
        links = tables.links.len(),
        images = tables.images.len(),
        "extracted structural tokens"
    );
    resolve::resolve(&escaped, &tables, is_article, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PresentationMode;

    fn cfg() -> RenderConfig {
        RenderConfig::default()
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(markdown_to_latex("", true, &cfg()), "");
    }

    #[test]
    fn plain_text_is_identity() {
        let text = "no markup, no reserved characters.";
        assert_eq!(markdown_to_latex(text, true, &cfg()), text);
    }

    #[test]
    fn header_leaves_no_token_residue() {
        let out = markdown_to_latex("# Title\n", true, &cfg());
        assert_eq!(out, "\\section*{Title}\n");
        assert!(!out.contains('\u{E000}'));
    }

    #[test]
    fn header_text_is_escaped() {
        let out = markdown_to_latex("## Q&A time", true, &cfg());
        assert_eq!(out, "\\subsection*{Q\\&A time}");
    }

    #[test]
    fn bold_and_italic_keep_original_order() {
        let out = markdown_to_latex("**bold** and *italic*", true, &cfg());
        let bold_at = out.find("\\textbf{bold}").expect("bold present");
        let italic_at = out.find("\\textit{italic}").expect("italic present");
        assert!(bold_at < italic_at);
    }

    #[test]
    fn url_with_reserved_characters_survives_into_href() {
        let out = markdown_to_latex("[text](http://x.com/a_b#c)", true, &cfg());
        assert_eq!(out, "\\href{http://x.com/a_b#c}{text}");
    }

    #[test]
    fn print_article_url_is_qr_encoded_verbatim() {
        let config = RenderConfig::builder()
            .mode(PresentationMode::Print)
            .build()
            .unwrap();
        let out = markdown_to_latex("[text](http://x.com/a_b#c)", true, &config);
        assert!(out.contains("\\qrcode[height=0.8in,hyperlink=false]{http://x.com/a_b#c}"));
        assert!(out.contains("{\\small http://x.com/a\\_b\\#c}"));
    }

    #[test]
    fn list_followed_by_plain_line() {
        let out = markdown_to_latex("- a\n- b\nc", true, &cfg());
        assert_eq!(
            out,
            "\\begin{itemize}\n\\item a\n\\item b\n\\end{itemize}\nc"
        );
    }

    #[test]
    fn image_caption_is_italic_text_after_the_image() {
        let out = markdown_to_latex("![shot](./img/p.png)\n*The caption*", true, &cfg());
        assert!(out.contains("{./articles/images/img/p.png}"));
        assert!(out.ends_with("\\textit{The caption}"));
    }

    #[test]
    fn escaped_text_never_double_escapes_on_reconversion() {
        let once = markdown_to_latex("fees & taxes", true, &cfg());
        let twice = markdown_to_latex(&once, true, &cfg());
        assert_eq!(once, twice);
    }

    #[test]
    fn mixed_document_converts_end_to_end() {
        let md = "# News\n\
                  Visit [our site](https://acm.illinois.edu/sig_list).\n\
                  - one\n\
                  - two\n\
                  **Done** at 100%";
        let out = markdown_to_latex(md, false, &cfg());
        assert!(out.contains("\\section*{News}"));
        assert!(out.contains("\\href{https://acm.illinois.edu/sig_list}{our site}"));
        assert!(out.contains("\\begin{itemize}"));
        assert!(out.contains("\\textbf{Done} at 100\\%"));
        assert!(!out.contains('\u{E000}'), "no token residue");
    }
}
