use chrono::Utc;
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::model::Document;
use super::xml;
use crate::errors::RenderError;

// @module: ZIP packaging of WordprocessingML parts

/// Write the complete package for `document` into `writer`
pub fn write_package<W: Write + Seek>(document: &Document, writer: W) -> Result<W, RenderError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, String); 7] = [
        ("[Content_Types].xml", xml::content_types_xml().to_string()),
        ("_rels/.rels", xml::package_rels_xml().to_string()),
        ("docProps/core.xml", xml::core_xml(document.title.as_deref(), Utc::now())),
        ("docProps/app.xml", xml::app_xml()),
        ("word/document.xml", xml::document_xml(document)),
        ("word/styles.xml", xml::styles_xml(&document.default_font)),
        ("word/_rels/document.xml.rels", xml::document_rels_xml().to_string()),
    ];

    for (name, content) in &parts {
        zip.start_file(*name, options)?;
        zip.write_all(content.as_bytes())?;
    }

    Ok(zip.finish()?)
}

/// Render the package into memory
pub fn to_bytes(document: &Document) -> Result<Vec<u8>, RenderError> {
    let cursor = write_package(document, Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}

/// Save the package to `path`, replacing any existing file
pub fn save<P: AsRef<Path>>(document: &Document, path: P) -> Result<(), RenderError> {
    let file = File::create(path.as_ref())?;
    let mut writer = write_package(document, BufWriter::new(file))?;
    writer.flush()?;
    Ok(())
}
