//! Pipeline stages for markdown-to-LaTeX conversion.
//!
//! Each submodule implements exactly one rewrite phase. The phases are
//! order-dependent and deliberately kept apart so that each stage's
//! precondition ("structural markup has already been tokenised", "URLs are
//! already out of the text") is locally checkable and independently
//! testable.
//!
//! ## Data Flow
//!
//! ```text
//! markdown ──▶ extract ──▶ escape ──▶ resolve ──▶ LaTeX fragment
//!              (tokens)    (literals,  (final
//!                           side tables) markup)
//! ```
//!
//! 1. [`extract`] — replace headers, emphasis, line breaks, images, links
//!    and bullet lists with opaque tokens that the escaper cannot touch
//! 2. [`escape`]  — move link/image payloads into side tables, then rewrite
//!    every LaTeX-reserved character into its literal form
//! 3. [`resolve`] — expand every token into final LaTeX, consulting the
//!    presentation mode for link rendering
//!
//! ## Token encoding
//!
//! Tokens are framed by [`DELIM`], a Unicode private-use character chosen
//! because it cannot appear in legitimate newsletter copy. Input that does
//! contain it has undefined output; this is a documented limitation rather
//! than something the pipeline detects or repairs. Link tokens separate
//! display text from URL with [`SEP`], a second private-use character.

pub mod escape;
pub mod extract;
pub mod resolve;

/// Frames every token embedded in the text under transformation.
pub(crate) const DELIM: char = '\u{E000}';

/// Separates a link token's display text from its URL.
pub(crate) const SEP: char = '\u{E001}';

/// Ordered payload stores that shield raw URLs and image paths from the
/// literal-escaping sweep.
///
/// Both tables are append-only during [`escape`] and consumed positionally
/// during [`resolve`]; entry `i` corresponds to the `i`-th indexed
/// reference token left behind in the text. The tables live for a single
/// conversion call and are discarded with the output.
#[derive(Debug, Default)]
pub struct SideTables {
    /// `(display_text, url)` per link, in extraction order.
    pub links: Vec<(String, String)>,
    /// Image path per image reference, in extraction order.
    pub images: Vec<String>,
}
