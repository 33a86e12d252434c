/*!
 * Minimal DOCX (Office Open XML) writer.
 *
 * This module is organized into:
 * - `model`: in-memory document (headings, styled paragraphs)
 * - `xml`: WordprocessingML part generation
 * - `package`: ZIP container assembly and persistence
 */

pub mod model;
pub mod package;
pub mod xml;

pub use model::{Block, Document, FontSpec, InvalidColor, Paragraph, RgbColor, Run, MAX_HEADING_LEVEL};
pub use package::{save, to_bytes, write_package};
