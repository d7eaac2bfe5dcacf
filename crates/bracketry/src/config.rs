//! Configuration types for bracket layout.
//!
//! All spacing magnitudes used by the layout engine live in [`LayoutConfig`]
//! and are passed explicitly into every computation. All types implement
//! [`serde::Deserialize`] so they can be loaded from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`LayoutConfig`] - Pair, title and indent sizes in pixels.
//!
//! # Example
//!
//! ```
//! # use bracketry::config::{AppConfig, LayoutConfig};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().pair_height(), 56.0);
//!
//! let compact = LayoutConfig::default().with_pair_height(20.0);
//! assert_eq!(compact.pair_height(), 20.0);
//! ```

use serde::Deserialize;

/// Top-level configuration root.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given layout section.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Spacing magnitudes of the bracket diagram, in pixels.
///
/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Height of a single pair box.
    pair_height: f32,

    /// Height of the round title area above the first pair.
    title_height: f32,

    /// Top margin of the first pair and bottom margin of a round.
    side_indent: f32,

    /// Gap between siblings feeding the same downstream pair.
    small_indent: f32,

    /// Gap between siblings feeding different downstream pairs.
    large_indent: f32,

    /// Vertical correction applied when a bracket line crosses layers.
    different_layers_offset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pair_height: 56.0,
            title_height: 40.0,
            side_indent: 16.0,
            small_indent: 8.0,
            large_indent: 24.0,
            different_layers_offset: 15.0,
        }
    }
}

impl LayoutConfig {
    pub fn pair_height(&self) -> f32 {
        self.pair_height
    }

    pub fn title_height(&self) -> f32 {
        self.title_height
    }

    pub fn side_indent(&self) -> f32 {
        self.side_indent
    }

    pub fn small_indent(&self) -> f32 {
        self.small_indent
    }

    pub fn large_indent(&self) -> f32 {
        self.large_indent
    }

    pub fn different_layers_offset(&self) -> f32 {
        self.different_layers_offset
    }

    pub fn with_pair_height(mut self, pair_height: f32) -> Self {
        self.pair_height = pair_height;
        self
    }

    pub fn with_title_height(mut self, title_height: f32) -> Self {
        self.title_height = title_height;
        self
    }

    pub fn with_side_indent(mut self, side_indent: f32) -> Self {
        self.side_indent = side_indent;
        self
    }

    pub fn with_small_indent(mut self, small_indent: f32) -> Self {
        self.small_indent = small_indent;
        self
    }

    pub fn with_large_indent(mut self, large_indent: f32) -> Self {
        self.large_indent = large_indent;
        self
    }

    pub fn with_different_layers_offset(mut self, different_layers_offset: f32) -> Self {
        self.different_layers_offset = different_layers_offset;
        self
    }

    /// Checks that every magnitude is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("pair_height", self.pair_height),
            ("title_height", self.title_height),
            ("side_indent", self.side_indent),
            ("small_indent", self.small_indent),
            ("large_indent", self.large_indent),
            ("different_layers_offset", self.different_layers_offset),
        ];

        match fields
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((name, value)) => Err(format!(
                "Invalid layout value `{name}` = {value}: expected a finite, non-negative number"
            )),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_layout_section_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            pair_height = 20.0
            large_indent = 30.0
            "#,
        )
        .unwrap();

        let layout = config.layout();
        assert_eq!(layout.pair_height(), 20.0);
        assert_eq!(layout.large_indent(), 30.0);
        assert_eq!(layout.small_indent(), LayoutConfig::default().small_indent());
        assert_eq!(layout.title_height(), LayoutConfig::default().title_height());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        assert!(LayoutConfig::default().validate().is_ok());

        let negative = LayoutConfig::default().with_side_indent(-1.0);
        let err = negative.validate().unwrap_err();
        assert!(err.contains("side_indent"));

        let nan = LayoutConfig::default().with_different_layers_offset(f32::NAN);
        assert!(nan.validate().is_err());
    }
}
