/*!
 * In-memory document model for DOCX output.
 *
 * The model only carries what the renderer needs: headings up to level 3,
 * paragraphs made of runs with an optional size and colour, and trailing
 * paragraph spacing.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Deepest heading level with a dedicated style (level 0 is the title)
pub const MAX_HEADING_LEVEL: u8 = 3;

/// Colour given as six hex digits, with or without a leading '#'
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid colour '{0}': expected six hex digits such as \"FF6400\"")]
pub struct InvalidColor(pub String);

/// 24-bit RGB colour, serialized as "RRGGBB"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase hex form used by WordprocessingML
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidColor(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| InvalidColor(s.to_string()))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for RgbColor {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

/// Default font applied through the Normal style
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub name: String,
    pub size_pt: f32,
}

impl FontSpec {
    pub fn new(name: impl Into<String>, size_pt: f32) -> Self {
        Self {
            name: name.into(),
            size_pt,
        }
    }
}

/// A span of text sharing one set of character properties
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    pub text: String,
    /// Overrides the style's point size
    pub size_pt: Option<f32>,
    pub color: Option<RgbColor>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Whether the run carries any direct formatting
    pub fn has_properties(&self) -> bool {
        self.size_pt.is_some() || self.color.is_some()
    }
}

/// A body paragraph in the Normal style
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    /// Space after the paragraph, in points
    pub space_after_pt: Option<f32>,
}

impl Paragraph {
    /// Paragraph holding a single unformatted run
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::new(text)],
            space_after_pt: None,
        }
    }

    /// Set the point size of the first run
    pub fn with_size(mut self, size_pt: f32) -> Self {
        if let Some(run) = self.runs.first_mut() {
            run.size_pt = Some(size_pt);
        }
        self
    }

    /// Set the colour of the first run
    pub fn with_color(mut self, color: RgbColor) -> Self {
        if let Some(run) = self.runs.first_mut() {
            run.color = Some(color);
        }
        self
    }

    pub fn with_space_after(mut self, space_after_pt: f32) -> Self {
        self.space_after_pt = Some(space_after_pt);
        self
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Top-level content of the document body
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Level 0 is the document title, 1..=3 are section headings
    Heading { level: u8, text: String },
    Paragraph(Paragraph),
}

/// A complete document ready for packaging
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Title recorded in the package properties
    pub title: Option<String>,
    pub default_font: FontSpec,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(default_font: FontSpec) -> Self {
        Self {
            title: None,
            default_font,
            blocks: Vec::new(),
        }
    }

    /// Append a heading; levels deeper than `MAX_HEADING_LEVEL` are capped
    pub fn add_heading(&mut self, text: impl Into<String>, level: u8) {
        self.blocks.push(Block::Heading {
            level: level.min(MAX_HEADING_LEVEL),
            text: text.into(),
        });
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    /// Body paragraphs in order, headings excluded
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(paragraph) => Some(paragraph),
            Block::Heading { .. } => None,
        })
    }

    /// Headings in order as (level, text)
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading { level, text } => Some((*level, text.as_str())),
            Block::Paragraph(_) => None,
        })
    }
}
