/*!
 * # docalign - bilingual alignment tooling for extracted documents
 *
 * Turns plain-text dumps of documents (for example `pdftotext` output) into
 * alignment JSON ready for translation, and renders translated alignment
 * files into DOCX documents.
 *
 * ## Features
 *
 * - Paragraph reconstruction from hard-wrapped text with hyphenation repair
 * - Numbered heading detection ("3.1 ACCESS METHOD") for section labels
 * - Configurable boilerplate (page numbers, footers) stripping
 * - Translation placeholder files with empty `ja` fields
 * - DOCX output in translation-only or bilingual layout
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `alignment`: The alignment record and its JSON form
 * - `segmenter`: Text to alignment records
 * - `placeholder`: Placeholder file for the translation step
 * - `renderer`: Alignment records to a document model
 * - `docx`: Document model, WordprocessingML and packaging
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod docx;
pub mod errors;
pub mod file_utils;
pub mod placeholder;
pub mod renderer;
pub mod segmenter;

// Re-export main types for easier usage
pub use alignment::AlignmentRecord;
pub use app_config::Config;
pub use errors::{AppError, RenderError, SegmentError};
pub use renderer::{heading_level, DocumentRenderer};
pub use segmenter::Segmenter;
