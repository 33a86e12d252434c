use std::borrow::Cow;

use log::debug;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::alignment::AlignmentRecord;
use crate::app_config::{NoisePattern, SegmenterConfig};
use crate::errors::SegmentError;

// @module: Paragraph segmentation of extracted document text

// @const: Numbered all-caps heading, e.g. "3.1 ACCESS METHOD"
static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(\.\d+)*\s+[A-Z\s]+$").unwrap()
});

// @const: Hyphen left behind by a hard line wrap
static WRAP_HYPHEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-\s+").unwrap()
});

/// Whether a trimmed line is a section heading
pub fn is_heading(line: &str) -> bool {
    HEADING_REGEX.is_match(line)
}

/// Join wrapped lines into one paragraph and undo wrap hyphenation.
///
/// Every hyphen followed by whitespace is collapsed, so a genuine compound
/// hyphen that happened to end a line is joined as well.
pub fn rebuild_paragraph<S: AsRef<str>>(lines: &[S]) -> String {
    let joined = lines
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<_>>()
        .join(" ");

    WRAP_HYPHEN_REGEX.replace_all(&joined, "").into_owned()
}

fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Ordered table of compiled noise-stripping rules
#[derive(Debug, Clone, Default)]
pub struct NoiseFilter {
    rules: Vec<(Regex, String)>,
}

impl NoiseFilter {
    /// Compile a rule table, failing on the first invalid pattern
    pub fn from_patterns(patterns: &[NoisePattern]) -> Result<Self, SegmentError> {
        let rules = patterns
            .iter()
            .map(|noise| {
                RegexBuilder::new(&noise.pattern)
                    .case_insensitive(noise.case_insensitive)
                    .build()
                    .map(|regex| (regex, noise.replacement.clone()))
                    .map_err(|source| SegmentError::InvalidNoisePattern {
                        pattern: noise.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Number of rules in the table
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule, in order, to the whole text
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |cleaned, (regex, replacement)| {
                regex.replace_all(&cleaned, replacement.as_str()).into_owned()
            })
    }
}

// Scan state folded over the lines of one document.
struct ScanState {
    current_section: String,
    buffer: Vec<String>,
    records: Vec<AlignmentRecord>,
}

impl ScanState {
    fn new(default_section: &str) -> Self {
        Self {
            current_section: default_section.to_string(),
            buffer: Vec::new(),
            records: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let paragraph = rebuild_paragraph(&self.buffer);
        self.records.push(AlignmentRecord::new(self.current_section.clone(), paragraph));
        self.buffer.clear();
    }

    fn feed(mut self, line: &str) -> Self {
        let line = line.trim();

        if line.is_empty() {
            self.flush();
        } else if is_heading(line) {
            // Pending text belongs to the previous section
            self.flush();
            self.current_section = line.to_string();
        } else {
            self.buffer.push(line.to_string());
        }

        self
    }

    fn finish(mut self) -> Vec<AlignmentRecord> {
        self.flush();
        self.records
    }
}

/// Turns raw extracted text into ordered alignment records
#[derive(Debug, Clone)]
pub struct Segmenter {
    noise: NoiseFilter,
    default_section: String,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::from_config(&SegmenterConfig::default())
            .expect("built-in noise patterns compile")
    }
}

impl Segmenter {
    /// Build a segmenter from configuration
    pub fn from_config(config: &SegmenterConfig) -> Result<Self, SegmentError> {
        Ok(Self {
            noise: NoiseFilter::from_patterns(&config.noise_patterns)?,
            default_section: config.default_section.clone(),
        })
    }

    /// Build a segmenter with an explicit noise table
    pub fn new(noise: NoiseFilter, default_section: impl Into<String>) -> Self {
        Self {
            noise,
            default_section: default_section.into(),
        }
    }

    /// Section label used before the first heading
    pub fn default_section(&self) -> &str {
        &self.default_section
    }

    /// Segment a text blob into records with empty translations
    pub fn segment(&self, text: &str) -> Vec<AlignmentRecord> {
        let text = normalize_newlines(text);
        let cleaned = self.noise.apply(&text);

        let records = cleaned
            .split('\n')
            .fold(ScanState::new(&self.default_section), ScanState::feed)
            .finish();

        if log::max_level() >= log::LevelFilter::Debug {
            let mut sections: Vec<&str> = records.iter().map(|r| r.section.as_str()).collect();
            sections.dedup();
            debug!("Segmented {} paragraph(s) across {} section run(s)", records.len(), sections.len());
        }

        records
    }
}
