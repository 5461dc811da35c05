//! End-to-end conversion tests over the public API: markdown in, LaTeX
//! fragment out, across both presentation modes.

use md2tex::{escape_plain, markdown_to_latex, PresentationMode, RenderConfig};

fn online() -> RenderConfig {
    RenderConfig::default()
}

fn print() -> RenderConfig {
    RenderConfig::builder()
        .mode(PresentationMode::Print)
        .build()
        .unwrap()
}

#[test]
fn plain_prose_without_reserved_chars_is_unchanged() {
    let text = "A quiet paragraph.\n\nAnother one, with punctuation!";
    assert_eq!(markdown_to_latex(text, false, &online()), text);
}

#[test]
fn full_article_renders_every_construct() {
    let markdown = "\
# Fall Recap

The semester is **80% done** & counting.

## Highlights

- *Hack night* drew 120 people
- Budget hit $1,000

![group photo](./photos/hack_night.png)

Read more on [our blog](https://blog.example.com/posts#fall_2025).<br/>
See you soon.";

    let latex = markdown_to_latex(markdown, false, &online());

    assert!(latex.contains("\\section*{Fall Recap}"));
    assert!(latex.contains("\\subsection*{Highlights}"));
    assert!(latex.contains("\\textbf{80\\% done}"));
    assert!(latex.contains("\\& counting"));
    assert!(latex.contains("\\begin{itemize}"));
    assert!(latex.contains("\\item \\textit{Hack night} drew 120 people"));
    assert!(latex.contains("\\item Budget hit \\$1,000"));
    assert!(latex.contains("\\end{itemize}"));
    assert!(latex.contains(
        "\\includegraphics[width=0.9\\columnwidth]{./articles/images/photos/hack_night.png}"
    ));
    assert!(latex.contains("\\href{https://blog.example.com/posts#fall_2025}{our blog}"));
    assert!(latex.contains("\\vspace{0.5em}"));
    assert!(!latex.contains('\u{E000}'), "no delimiter residue: {latex}");
}

#[test]
fn url_payloads_survive_escaping_verbatim() {
    let url = "https://x.com/a_b#c%20d~e";
    let latex = markdown_to_latex(&format!("[link]({url})"), false, &online());
    assert_eq!(latex, format!("\\href{{{url}}}{{link}}"));
}

#[test]
fn print_mode_articles_get_qr_codes_with_escaped_captions() {
    let latex = markdown_to_latex("[site](https://x.com/a_b#c)", true, &print());
    assert!(latex.contains("\\qrcode[height=0.8in,hyperlink=false]{https://x.com/a_b#c}"));
    assert!(latex.contains("{\\small https://x.com/a\\_b\\#c}"));
    assert!(!latex.contains("\\href"));
}

#[test]
fn print_mode_non_article_text_keeps_href() {
    let latex = markdown_to_latex("[site](https://x.com)", false, &print());
    assert_eq!(latex, "\\href{https://x.com}{site}");
}

#[test]
fn online_mode_articles_keep_href() {
    let latex = markdown_to_latex("[site](https://x.com)", true, &online());
    assert_eq!(latex, "\\href{https://x.com}{site}");
}

#[test]
fn headers_only_match_at_line_start() {
    let latex = markdown_to_latex("not # a header", false, &online());
    assert_eq!(latex, "not \\# a header");
}

#[test]
fn custom_images_dir_is_honoured() {
    let config = RenderConfig::builder()
        .images_dir("assets/img")
        .build()
        .unwrap();
    let latex = markdown_to_latex("![x](pic.png)", false, &config);
    assert!(latex.contains("{./assets/img/pic.png}"));
}

#[test]
fn already_escaped_text_is_not_double_escaped() {
    let once = markdown_to_latex("fees & taxes: 10%", false, &online());
    assert_eq!(once, "fees \\& taxes: 10\\%");
    let twice = markdown_to_latex(&once, false, &online());
    assert_eq!(twice, once);
}

#[test]
fn escape_plain_covers_the_full_reserved_set() {
    assert_eq!(
        escape_plain("a&b%c$d#e_f|g~h^i"),
        "a\\&b\\%c\\$d\\#e\\_f\\textbar{}g\\textasciitilde{}h\\textasciicircum{}i"
    );
}

#[test]
fn lists_close_before_following_prose_and_at_eof() {
    let closed = markdown_to_latex("- a\n- b\nafter", false, &online());
    assert!(closed.contains("\\end{itemize}\nafter"));

    let at_eof = markdown_to_latex("intro\n- only", false, &online());
    assert!(at_eof.ends_with("\\end{itemize}"));
}

#[test]
fn empty_input_renders_empty() {
    assert_eq!(markdown_to_latex("", true, &print()), "");
    assert_eq!(escape_plain(""), "");
}
