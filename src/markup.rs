//! Style attributes to markup tags
//!
//!     The diary text format understands a small XML-like vocabulary. Of it, only `font` is
//!     produced: `color` and `size` both land on the same `font` tag, color first.
//!
//!     Size names are translated to point sizes through a [`FontSizeTable`]:
//!
//!         small → 9.75, large → 27.69, huge → 32.5, anything else → 13
//!
//!     Every other attribute is ignored.

use crate::delta::{FontSize, StyleAttributes};
use log::debug;
use serde::Deserialize;
use std::fmt;

/// Tag name used for color and size.
pub const FONT_TAG: &str = "font";

/// Scalar value of a tag attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(text) => f.write_str(text),
            // f64 Display is shortest round-trip: 13.0 prints as "13", 27.69 as "27.69"
            AttrValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

/// Point sizes for the categorical size names.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FontSizeTable {
    pub small: f64,
    pub large: f64,
    pub huge: f64,
    pub default: f64,
}

impl FontSizeTable {
    pub fn point_size(&self, size: &FontSize) -> f64 {
        match size {
            FontSize::Small => self.small,
            FontSize::Large => self.large,
            FontSize::Huge => self.huge,
            FontSize::Other(_) => self.default,
        }
    }
}

impl Default for FontSizeTable {
    fn default() -> Self {
        Self {
            small: 9.75,
            large: 27.69,
            huge: 32.5,
            default: 13.0,
        }
    }
}

/// Attributes of the `font` tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontAttributes {
    pub color: Option<String>,
    pub size: Option<f64>,
}

impl FontAttributes {
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.size.is_none()
    }

    /// Attributes in render order.
    pub fn attributes(&self) -> Vec<(&'static str, AttrValue)> {
        let mut attrs = Vec::with_capacity(2);
        if let Some(color) = &self.color {
            attrs.push(("color", AttrValue::Text(color.clone())));
        }
        if let Some(size) = self.size {
            attrs.push(("size", AttrValue::Number(size)));
        }
        attrs
    }
}

/// Tags synthesized for one fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupTags {
    pub font: Option<FontAttributes>,
}

impl MarkupTags {
    pub fn is_empty(&self) -> bool {
        self.font.is_none()
    }

    /// `(tag name, attributes)` pairs in application order; the first pair wraps innermost.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Vec<(&'static str, AttrValue)>)> + '_ {
        self.font
            .iter()
            .map(|font| (FONT_TAG, font.attributes()))
    }
}

/// Map style attributes with the default size table.
pub fn map_attributes(style: Option<&StyleAttributes>) -> MarkupTags {
    map_attributes_with(style, &FontSizeTable::default())
}

pub fn map_attributes_with(style: Option<&StyleAttributes>, sizes: &FontSizeTable) -> MarkupTags {
    let Some(style) = style else {
        return MarkupTags::default();
    };

    let mut font = FontAttributes::default();
    if let Some(color) = &style.color {
        font.color = Some(color.clone());
    }
    if let Some(size) = &style.size {
        font.size = Some(sizes.point_size(size));
    }

    let ignored = style.ignored_keys();
    if !ignored.is_empty() {
        debug!("ignoring unsupported attributes: {}", ignored.join(", "));
    }

    MarkupTags {
        font: (!font.is_empty()).then_some(font),
    }
}
