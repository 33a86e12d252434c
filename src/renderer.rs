use log::{debug, info, warn};
use std::path::Path;

use crate::alignment::{self, AlignmentRecord};
use crate::app_config::RendererConfig;
use crate::docx::{self, Document, FontSpec, Paragraph, MAX_HEADING_LEVEL};
use crate::errors::RenderError;

// @module: Alignment records to formatted document

/// Title used when none is configured
pub const DEFAULT_TITLE: &str = "Document Translation";

/// Heading depth for a section label: one level per dot-separated group,
/// capped at 3 ("1 ABSTRACT" is 1, "3.1 ACCESS METHOD" is 2).
pub fn heading_level(section: &str) -> u8 {
    let dots = section.matches('.').count();
    dots.saturating_add(1).min(MAX_HEADING_LEVEL as usize) as u8
}

/// Builds and saves a document from alignment records
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    config: RendererConfig,
}

impl DocumentRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Title heading text, falling back to `DEFAULT_TITLE` when unset or empty
    pub fn title(&self) -> &str {
        self.config
            .title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }

    /// Build the document model for `records`
    pub fn build(&self, records: &[AlignmentRecord]) -> Document {
        let config = &self.config;
        let mut document = Document::new(FontSpec::new(config.font_name.clone(), config.font_size));

        let title = self.title();
        document.title = Some(title.to_string());
        document.add_heading(title, 0);

        let mut last_section: Option<&str> = None;

        for record in records {
            let section = record.section.as_str();
            if !section.is_empty() && last_section != Some(section) {
                document.add_heading(section, heading_level(section));
                last_section = Some(section);
            }

            if config.bilingual {
                self.push_bilingual(&mut document, record);
            } else {
                self.push_translation_only(&mut document, record);
            }
        }

        document
    }

    fn push_bilingual(&self, document: &mut Document, record: &AlignmentRecord) {
        let config = &self.config;

        if !record.source_text.is_empty() {
            document.add_paragraph(
                Paragraph::new(record.source_text.as_str())
                    .with_size(config.source_font_size)
                    .with_color(config.source_color),
            );
        }

        if record.is_translated() {
            document.add_paragraph(
                Paragraph::new(record.translated_text.as_str())
                    .with_space_after(config.translation_space_after),
            );
        } else {
            document.add_paragraph(
                Paragraph::new(config.untranslated_marker.as_str())
                    .with_color(config.untranslated_color),
            );
        }
    }

    fn push_translation_only(&self, document: &mut Document, record: &AlignmentRecord) {
        let config = &self.config;

        if record.is_translated() {
            document.add_paragraph(Paragraph::new(record.translated_text.as_str()));
        } else {
            let marked = format!("{} {}", config.needs_translation_marker, record.source_text);
            document.add_paragraph(Paragraph::new(marked).with_color(config.needs_translation_color));
        }
    }

    /// Build the document and write it to `output_path`
    pub fn render_to_file<P: AsRef<Path>>(
        &self,
        records: &[AlignmentRecord],
        output_path: P,
    ) -> Result<(), RenderError> {
        let output_path = output_path.as_ref();

        let missing = alignment::untranslated_count(records);
        if missing > 0 {
            warn!(
                "{} of {} record(s) have no translation ({:.1}% translated)",
                missing,
                records.len(),
                alignment::translation_progress(records)
            );
        }

        let document = self.build(records);
        debug!(
            "Built document with {} block(s), bilingual: {}",
            document.blocks.len(),
            self.config.bilingual
        );

        docx::save(&document, output_path)?;
        info!("Successfully saved to {}", output_path.display());

        Ok(())
    }
}
