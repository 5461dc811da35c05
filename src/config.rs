//! Configuration types for markdown-to-LaTeX rendering.
//!
//! All rendering behaviour is controlled through [`RenderConfig`], built via
//! its [`RenderConfigBuilder`]. Keeping every knob in one struct makes one
//! conversion run reproducible: the mode is fixed before any content is
//! converted and never mutated mid-issue, so concurrent conversions of
//! independent articles can share a `&RenderConfig` freely.

use crate::error::Md2TexError;
use serde::{Deserialize, Serialize};

/// Where the generated issue will be consumed, which decides how hyperlinks
/// render.
///
/// Print copies cannot be clicked, so article links become scannable QR
/// blocks with the URL printed underneath as a caption. Online copies keep
/// ordinary `\href` hyperlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PresentationMode {
    /// Clickable `\href` hyperlinks everywhere. (default)
    #[default]
    Online,
    /// QR codes with URL captions for article links; plain escaped URLs in
    /// the directory.
    Print,
}

/// Configuration for one issue's worth of conversions.
///
/// Built via [`RenderConfig::builder()`] or [`RenderConfig::default()`].
///
/// # Example
/// ```rust
/// use md2tex::{PresentationMode, RenderConfig};
///
/// let config = RenderConfig::builder()
///     .mode(PresentationMode::Print)
///     .build()
///     .unwrap();
/// assert_eq!(config.mode, PresentationMode::Print);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Presentation mode for the whole run. Default: [`PresentationMode::Online`].
    pub mode: PresentationMode,

    /// Directory images resolve under, relative to the LaTeX working
    /// directory. Default: `articles/images`.
    ///
    /// This is a hard contract with whoever stages image assets: a markdown
    /// reference `![logo](./img/logo.png)` becomes
    /// `\includegraphics{./articles/images/img/logo.png}`.
    pub images_dir: String,

    /// Maximum length of a display URL in online directory listings before
    /// it is truncated with an ellipsis. Default: 40.
    ///
    /// Long URLs overflow the two-column directory layout. Print mode never
    /// truncates because the printed URL is the only way to reach the site.
    pub display_url_max: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: PresentationMode::Online,
            images_dir: "articles/images".to_string(),
            display_url_max: 40,
        }
    }
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn mode(mut self, mode: PresentationMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn images_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.images_dir = dir.into();
        self
    }

    pub fn display_url_max(mut self, n: usize) -> Self {
        self.config.display_url_max = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenderConfig, Md2TexError> {
        let c = &self.config;
        if c.images_dir.is_empty() {
            return Err(Md2TexError::InvalidConfig(
                "images_dir must not be empty".into(),
            ));
        }
        if c.display_url_max < 4 {
            return Err(Md2TexError::InvalidConfig(format!(
                "display_url_max must be at least 4, got {}",
                c.display_url_max
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_online_with_fixed_images_dir() {
        let c = RenderConfig::default();
        assert_eq!(c.mode, PresentationMode::Online);
        assert_eq!(c.images_dir, "articles/images");
    }

    #[test]
    fn builder_rejects_empty_images_dir() {
        let err = RenderConfig::builder().images_dir("").build();
        assert!(err.is_err());
    }

    #[test]
    fn builder_rejects_tiny_url_budget() {
        let err = RenderConfig::builder().display_url_max(2).build();
        assert!(err.is_err());
    }
}
