/*!
 * Alignment records shared by the segmenter, the placeholder emitter and the
 * document renderer.
 *
 * On disk an alignment file is a JSON array of `{"section", "en", "ja"}`
 * objects. Reading is best-effort: a missing key or `null` value becomes an
 * empty string and unknown keys are ignored.
 */

use serde::{Deserialize, Deserializer, Serialize};

/// One unit of (section label, source paragraph, target paragraph)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentRecord {
    /// Heading label in effect when the paragraph was emitted
    #[serde(default, deserialize_with = "lenient_string")]
    pub section: String,

    /// Reconstructed source-language paragraph
    #[serde(rename = "en", default, deserialize_with = "lenient_string")]
    pub source_text: String,

    /// Target-language paragraph, filled by an external translation step
    #[serde(rename = "ja", default, deserialize_with = "lenient_string")]
    pub translated_text: String,
}

impl AlignmentRecord {
    /// Create an untranslated record
    pub fn new(section: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            source_text: source_text.into(),
            translated_text: String::new(),
        }
    }

    /// Attach a translation
    pub fn with_translation(mut self, translated_text: impl Into<String>) -> Self {
        self.translated_text = translated_text.into();
        self
    }

    /// Whether the translation field has been filled
    pub fn is_translated(&self) -> bool {
        !self.translated_text.is_empty()
    }
}

// Accepts a string or null; null reads as "".
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serialize records as indented JSON with non-ASCII text left unescaped
pub fn to_json(records: &[AlignmentRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Parse an alignment JSON array
pub fn from_json(content: &str) -> serde_json::Result<Vec<AlignmentRecord>> {
    serde_json::from_str(content)
}

/// Number of records still waiting for a translation
pub fn untranslated_count(records: &[AlignmentRecord]) -> usize {
    records.iter().filter(|r| !r.is_translated()).count()
}

/// Get translation progress as a percentage.
pub fn translation_progress(records: &[AlignmentRecord]) -> f32 {
    if records.is_empty() {
        return 100.0;
    }
    let translated = records.len() - untranslated_count(records);
    (translated as f32 / records.len() as f32) * 100.0
}
