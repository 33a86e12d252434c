use log::{debug, info};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::time::Instant;

use crate::alignment::{self, AlignmentRecord};
use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::placeholder;
use crate::renderer::DocumentRenderer;
use crate::segmenter::Segmenter;

// @module: Application controller for the segment and render pipelines

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Segmenter compiled from the configuration
    segmenter: Segmenter,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let segmenter = Segmenter::from_config(&config.segmenter)?;

        Ok(Self { config, segmenter })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read a UTF-8 input file, classifying missing and undecodable input
    fn read_input(input_file: &Path) -> Result<String, AppError> {
        if !input_file.exists() {
            return Err(AppError::InputNotFound(input_file.to_path_buf()));
        }

        std::fs::read_to_string(input_file).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => AppError::MalformedInput(format!(
                "{} is not valid UTF-8 text: {}",
                input_file.display(),
                e
            )),
            _ => AppError::File(format!("Failed to read {}: {}", input_file.display(), e)),
        })
    }

    /// Segment raw text with the configured segmenter
    pub fn segment_text(&self, text: &str) -> Vec<AlignmentRecord> {
        self.segmenter.segment(text)
    }

    /// Segment `input_file` into alignment JSON.
    ///
    /// The JSON goes to `output_file` when given, otherwise to standard output.
    /// A placeholder copy for translation is written when `placeholder_file` is given.
    pub fn run_segment(
        &self,
        input_file: &Path,
        output_file: Option<&Path>,
        placeholder_file: Option<&Path>,
    ) -> Result<Vec<AlignmentRecord>, AppError> {
        let start_time = Instant::now();

        let raw_text = Self::read_input(input_file)?;
        let records = self.segment_text(&raw_text);

        let json = alignment::to_json(&records)
            .map_err(|e| AppError::Unknown(format!("Failed to serialize alignment records: {}", e)))?;

        match output_file {
            Some(output_file) => {
                FileManager::write_to_file(output_file, &json)
                    .map_err(|e| AppError::write_failure(output_file, format!("{:#}", e)))?;
                info!("Alignment JSON created: {}", output_file.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", json)
                    .map_err(|e| AppError::File(format!("Failed to write to standard output: {}", e)))?;
            }
        }

        if let Some(placeholder_file) = placeholder_file {
            placeholder::emit_placeholder(&records, placeholder_file)
                .map_err(|e| AppError::write_failure(placeholder_file, format!("{:#}", e)))?;
        }

        debug!(
            "Segmented {:?} into {} record(s) in {:.2?}",
            input_file,
            records.len(),
            start_time.elapsed()
        );

        Ok(records)
    }

    /// Parse an alignment JSON file
    pub fn load_alignment(input_file: &Path) -> Result<Vec<AlignmentRecord>, AppError> {
        let content = Self::read_input(input_file)?;
        alignment::from_json(&content).map_err(|e| AppError::MalformedInput(format!("Invalid JSON format: {}", e)))
    }

    /// Render the alignment JSON at `input_file` into a DOCX at `output_file`
    pub fn run_render(&self, input_file: &Path, output_file: &Path) -> Result<(), AppError> {
        let start_time = Instant::now();

        let records = Self::load_alignment(input_file)?;
        info!("Loaded {} alignment record(s) from {}", records.len(), input_file.display());

        FileManager::ensure_parent_dir(output_file)
            .map_err(|e| AppError::write_failure(output_file, format!("{:#}", e)))?;

        let renderer = DocumentRenderer::new(self.config.renderer.clone());
        renderer
            .render_to_file(&records, output_file)
            .map_err(|e| AppError::write_failure(output_file, e))?;

        debug!("Rendered {:?} in {:.2?}", output_file, start_time.elapsed());

        Ok(())
    }
}
