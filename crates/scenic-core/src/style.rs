//! Visual style records and the style cascade.
//!
//! Every output element carries a fully populated [`Style`]. It is
//! resolved from three tiers, lowest precedence first:
//!
//! 1. A built-in base ([`Style::shape_default`] or [`Style::text_default`])
//! 2. A named [`StylePreset`] taken from the diagram's preset table
//! 3. Inline [`StyleOverrides`] on the element itself
//!
//! Each tier only replaces the fields it sets explicitly.
//!
//! # Example
//!
//! ```
//! # use scenic_core::style::{resolve, Style, StyleOverrides, StylePresets};
//! let mut presets = StylePresets::new();
//! presets.insert(
//!     "primary".to_string(),
//!     StyleOverrides::new().with_stroke_color("#1971c2"),
//! );
//!
//! let inline = StyleOverrides::new().with_stroke_width(4.0);
//! let style = resolve(&Style::shape_default(), Some("primary"), Some(&inline), &presets).unwrap();
//!
//! assert_eq!(style.stroke_color(), "#1971c2");
//! assert_eq!(style.stroke_width(), 4.0);
//! assert_eq!(style.roughness(), 1.0);
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

const DEFAULT_STROKE_COLOR: &str = "#1e1e1e";
const DEFAULT_BACKGROUND_COLOR: &str = "transparent";
const DEFAULT_FILL_STYLE: &str = "solid";
const DEFAULT_STROKE_STYLE: &str = "solid";
const DEFAULT_OPACITY: f64 = 100.0;

/// A sparse set of visual attributes.
///
/// Unset fields never override a lower tier of the cascade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    pub stroke_color: Option<String>,
    pub background_color: Option<String>,
    pub fill_style: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_style: Option<String>,
    pub roughness: Option<f64>,
    pub opacity: Option<f64>,
}

/// A named, reusable [`StyleOverrides`] record.
pub type StylePreset = StyleOverrides;

/// Preset table keyed by preset name, in declaration order.
pub type StylePresets = IndexMap<String, StylePreset>;

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_fill_style(mut self, fill_style: impl Into<String>) -> Self {
        self.fill_style = Some(fill_style.into());
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn with_stroke_style(mut self, stroke_style: impl Into<String>) -> Self {
        self.stroke_style = Some(stroke_style.into());
        self
    }

    pub fn with_roughness(mut self, roughness: f64) -> Self {
        self.roughness = Some(roughness);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// A fully resolved style, serialized inline into every output element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    stroke_color: String,
    background_color: String,
    fill_style: String,
    stroke_width: f64,
    stroke_style: String,
    roughness: f64,
    opacity: f64,
}

impl Style {
    /// Base style for boxes, ellipses, diamonds and arrows.
    pub fn shape_default() -> Self {
        Self::base(2.0, 1.0)
    }

    /// Base style for text elements: thinner stroke, no roughness.
    pub fn text_default() -> Self {
        Self::base(1.0, 0.0)
    }

    fn base(stroke_width: f64, roughness: f64) -> Self {
        Self {
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            fill_style: DEFAULT_FILL_STYLE.to_string(),
            stroke_width,
            stroke_style: DEFAULT_STROKE_STYLE.to_string(),
            roughness,
            opacity: DEFAULT_OPACITY,
        }
    }

    pub fn stroke_color(&self) -> &str {
        &self.stroke_color
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn fill_style(&self) -> &str {
        &self.fill_style
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn stroke_style(&self) -> &str {
        &self.stroke_style
    }

    pub fn roughness(&self) -> f64 {
        self.roughness
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Overlays every field set in `overrides` onto this style.
    pub fn apply(&mut self, overrides: &StyleOverrides) {
        if let Some(color) = &overrides.stroke_color {
            self.stroke_color.clone_from(color);
        }
        if let Some(color) = &overrides.background_color {
            self.background_color.clone_from(color);
        }
        if let Some(fill_style) = &overrides.fill_style {
            self.fill_style.clone_from(fill_style);
        }
        if let Some(width) = overrides.stroke_width {
            self.stroke_width = width;
        }
        if let Some(stroke_style) = &overrides.stroke_style {
            self.stroke_style.clone_from(stroke_style);
        }
        if let Some(roughness) = overrides.roughness {
            self.roughness = roughness;
        }
        if let Some(opacity) = overrides.opacity {
            self.opacity = opacity;
        }
    }
}

/// Error returned when an element names a preset missing from the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown style preset `{0}`")]
pub struct UnknownPresetError(pub String);

/// Resolves the three-tier style cascade into a concrete [`Style`].
///
/// # Arguments
///
/// * `base` - The built-in default for the element kind
/// * `preset_name` - Optional name of a preset in `presets`
/// * `overrides` - Optional inline overrides on the element
/// * `presets` - The diagram's preset table
///
/// # Errors
///
/// Returns [`UnknownPresetError`] if `preset_name` is not in `presets`.
pub fn resolve(
    base: &Style,
    preset_name: Option<&str>,
    overrides: Option<&StyleOverrides>,
    presets: &StylePresets,
) -> Result<Style, UnknownPresetError> {
    let mut style = base.clone();

    if let Some(name) = preset_name {
        let preset = presets
            .get(name)
            .ok_or_else(|| UnknownPresetError(name.to_string()))?;
        style.apply(preset);
    }

    if let Some(overrides) = overrides {
        style.apply(overrides);
    }

    Ok(style)
}
