//! Shared style schema for blocks
//!
//! Mirrors the wire format: camelCase keys, every field optional. Each block
//! kind accepts the subset of fields its panel exposes; unknown fields are a
//! validation error at the panel boundary, not here.

use serde::{Deserialize, Serialize};

/// Per-side padding, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Padding {
    pub fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// CSS shorthand, clockwise from top
    pub fn to_css(self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Named font stacks of the layout editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FontFamily {
    #[default]
    ModernSans,
    BookSans,
    OrganicSans,
    GeometricSans,
    HeavySans,
    RoundedSans,
    ModernSerif,
    BookSerif,
    Monospace,
}

impl FontFamily {
    pub fn font_stack(self) -> &'static str {
        match self {
            FontFamily::ModernSans => {
                "\"Helvetica Neue\", \"Arial Nova\", \"Nimbus Sans\", Arial, sans-serif"
            }
            FontFamily::BookSans => {
                "Optima, Candara, \"Noto Sans\", source-sans-pro, sans-serif"
            }
            FontFamily::OrganicSans => {
                "Seravek, \"Gill Sans Nova\", Ubuntu, Calibri, \"DejaVu Sans\", source-sans-pro, sans-serif"
            }
            FontFamily::GeometricSans => {
                "Avenir, \"Avenir Next LT Pro\", Montserrat, Corbel, \"URW Gothic\", source-sans-pro, sans-serif"
            }
            FontFamily::HeavySans => {
                "Bahnschrift, \"DIN Alternate\", \"Franklin Gothic Medium\", \"Nimbus Sans Narrow\", sans-serif-condensed, sans-serif"
            }
            FontFamily::RoundedSans => {
                "ui-rounded, \"Hiragino Maru Gothic ProN\", Quicksand, Comfortaa, Manjari, \"Arial Rounded MT Bold\", Calibri, source-sans-pro, sans-serif"
            }
            FontFamily::ModernSerif => {
                "Charter, \"Bitstream Charter\", \"Sitka Text\", Cambria, serif"
            }
            FontFamily::BookSerif => {
                "\"Iowan Old Style\", \"Palatino Linotype\", \"URW Palladio L\", P052, serif"
            }
            FontFamily::Monospace => {
                "\"Nimbus Mono PS\", \"Courier New\", \"Cutive Mono\", monospace"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub fn to_css(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn to_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Common style shape shared by the non-layout block kinds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
}

/// Inline `style="…"` attribute builder
///
/// Declarations are emitted in push order; `None` values are skipped.
#[derive(Debug, Default)]
pub struct StyleBuilder {
    declarations: Vec<String>,
}

impl StyleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, property: &str, value: impl AsRef<str>) -> &mut Self {
        self.declarations
            .push(format!("{}:{}", property, value.as_ref()));
        self
    }

    pub fn push_opt(&mut self, property: &str, value: Option<impl AsRef<str>>) -> &mut Self {
        if let Some(value) = value {
            self.push(property, value);
        }
        self
    }

    /// Common declarations for a [`BlockStyle`]
    pub fn push_block_style(&mut self, style: &BlockStyle) -> &mut Self {
        self.push_opt("color", style.color.as_deref());
        self.push_opt("background-color", style.background_color.as_deref());
        self.push_opt("font-family", style.font_family.map(FontFamily::font_stack));
        self.push_opt("font-size", style.font_size.map(|px| format!("{px}px")));
        self.push_opt("font-weight", style.font_weight.map(FontWeight::to_css));
        self.push_opt("text-align", style.text_align.map(TextAlign::to_css));
        self.push_opt("padding", style.padding.map(Padding::to_css));
        self.push_opt(
            "border",
            style
                .border_color
                .as_deref()
                .map(|color| format!("1px solid {color}")),
        );
        self.push_opt(
            "border-radius",
            style.border_radius.map(|radius| format!("{radius}px")),
        );
        self
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Render as a `style="…"` attribute (empty string when no declarations)
    pub fn to_attr(&self) -> String {
        if self.declarations.is_empty() {
            String::new()
        } else {
            format!(" style=\"{}\"", self.declarations.join(";"))
        }
    }
}
