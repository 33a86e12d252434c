use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::docx::RgbColor;
use crate::file_utils::FileManager;
use crate::segmenter::NoiseFilter;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Text segmentation settings
    #[serde(default)]
    pub segmenter: SegmenterConfig,

    /// Document rendering settings
    #[serde(default)]
    pub renderer: RendererConfig,
}

/// One boilerplate-stripping rule, applied to the whole text before scanning
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NoisePattern {
    // @field: Regular expression
    pub pattern: String,

    // @field: Replacement text, may reference capture groups as $1
    #[serde(default)]
    pub replacement: String,

    // @field: Match without regard to case
    #[serde(default)]
    pub case_insensitive: bool,
}

impl NoisePattern {
    /// A rule that deletes every match
    pub fn strip(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: String::new(),
            case_insensitive: false,
        }
    }

    /// Same rule, matching without regard to case
    pub fn ignoring_case(mut self) -> Self {
        self.case_insensitive = true;
        self
    }
}

/// Segmenter configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SegmenterConfig {
    /// Section label used before the first heading
    #[serde(default = "default_section")]
    pub default_section: String,

    /// Ordered noise-stripping rules
    #[serde(default = "default_noise_patterns")]
    pub noise_patterns: Vec<NoisePattern>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            default_section: default_section(),
            noise_patterns: default_noise_patterns(),
        }
    }
}

/// Renderer configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RendererConfig {
    /// Document title; "Document Translation" when unset
    #[serde(default)]
    pub title: Option<String>,

    /// Render source text next to the translation
    #[serde(default)]
    pub bilingual: bool,

    /// Default font family
    #[serde(default = "default_font_name")]
    pub font_name: String,

    /// Default font size in points
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Point size of source text in bilingual mode
    #[serde(default = "default_source_font_size")]
    pub source_font_size: f32,

    /// Colour of source text in bilingual mode
    #[serde(default = "default_source_color")]
    pub source_color: RgbColor,

    /// Spacing after a translated paragraph in bilingual mode, in points
    #[serde(default = "default_translation_space_after")]
    pub translation_space_after: f32,

    /// Marker shown in bilingual mode when a translation is missing
    #[serde(default = "default_untranslated_marker")]
    pub untranslated_marker: String,

    #[serde(default = "default_untranslated_color")]
    pub untranslated_color: RgbColor,

    /// Prefix placed before the source text in translation-only mode when a translation is missing
    #[serde(default = "default_needs_translation_marker")]
    pub needs_translation_marker: String,

    #[serde(default = "default_needs_translation_color")]
    pub needs_translation_color: RgbColor,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            title: None,
            bilingual: false,
            font_name: default_font_name(),
            font_size: default_font_size(),
            source_font_size: default_source_font_size(),
            source_color: default_source_color(),
            translation_space_after: default_translation_space_after(),
            untranslated_marker: default_untranslated_marker(),
            untranslated_color: default_untranslated_color(),
            needs_translation_marker: default_needs_translation_marker(),
            needs_translation_color: default_needs_translation_color(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_section() -> String {
    "General".to_string()
}

fn default_noise_patterns() -> Vec<NoisePattern> {
    vec![
        NoisePattern::strip(r"Page \d+ of \d+"),
        NoisePattern::strip(r"iab\.TECH LAB").ignoring_case(),
        NoisePattern::strip(r"©\d{4} IAB Technology Laboratory"),
        NoisePattern::strip(r"ads\.txt v\d+\.\d+"),
    ]
}

fn default_font_name() -> String {
    "Yu Mincho".to_string()
}

fn default_font_size() -> f32 {
    10.5
}

fn default_source_font_size() -> f32 {
    9.0
}

fn default_source_color() -> RgbColor {
    RgbColor::new(100, 100, 100)
}

fn default_translation_space_after() -> f32 {
    12.0
}

fn default_untranslated_marker() -> String {
    "[未翻訳]".to_string()
}

fn default_untranslated_color() -> RgbColor {
    RgbColor::new(255, 0, 0)
}

fn default_needs_translation_marker() -> String {
    "[TODO: 翻訳が必要]".to_string()
}

fn default_needs_translation_color() -> RgbColor {
    RgbColor::new(255, 100, 0)
}

fn check_point_size(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(anyhow!("{} must be a positive number of points, got {}", name, value));
    }
    Ok(())
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// A missing file is replaced by the default configuration, which is also
    /// written to `path` so it can be edited later.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;

            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        FileManager::write_to_file(path, &config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        NoiseFilter::from_patterns(&self.segmenter.noise_patterns)?;

        check_point_size("renderer.font_size", self.renderer.font_size)?;
        check_point_size("renderer.source_font_size", self.renderer.source_font_size)?;

        let spacing = self.renderer.translation_space_after;
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(anyhow!(
                "renderer.translation_space_after must not be negative, got {}",
                spacing
            ));
        }

        if self.renderer.font_name.trim().is_empty() {
            return Err(anyhow!("renderer.font_name must not be empty"));
        }

        Ok(())
    }
}
