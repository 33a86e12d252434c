//! WordprocessingML part generation.
//!
//! Every function here is a pure string builder; packaging the parts into a
//! ZIP container happens in `package`.

use chrono::{DateTime, Utc};
use quick_xml::escape::escape;

use super::model::{Block, Document, FontSpec, Paragraph, Run};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const WORD_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Style id used for a heading level
pub fn heading_style_id(level: u8) -> String {
    if level == 0 {
        "Title".to_string()
    } else {
        format!("Heading{}", level)
    }
}

/// Font size in the half-point unit used by `w:sz`
pub fn half_points(size_pt: f32) -> u32 {
    (size_pt * 2.0).round().max(1.0) as u32
}

/// Length in the twentieth-of-a-point unit used by `w:spacing`
pub fn twips(size_pt: f32) -> u32 {
    (size_pt * 20.0).round().max(0.0) as u32
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Escape text for XML content, dropping characters XML 1.0 cannot carry
pub fn escape_text(text: &str) -> String {
    let valid: String = text.chars().filter(|c| is_xml_char(*c)).collect();
    escape(valid.as_str()).into_owned()
}

fn push_run_text(out: &mut String, text: &str) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push_str("<w:br/>");
        }
        for (j, piece) in line.split('\t').enumerate() {
            if j > 0 {
                out.push_str("<w:tab/>");
            }
            if !piece.is_empty() {
                out.push_str(r#"<w:t xml:space="preserve">"#);
                out.push_str(&escape_text(piece));
                out.push_str("</w:t>");
            }
        }
    }
}

fn push_run(out: &mut String, run: &Run) {
    out.push_str("<w:r>");
    if run.has_properties() {
        out.push_str("<w:rPr>");
        if let Some(color) = run.color {
            out.push_str(&format!(r#"<w:color w:val="{}"/>"#, color.to_hex()));
        }
        if let Some(size) = run.size_pt {
            let sz = half_points(size);
            out.push_str(&format!(r#"<w:sz w:val="{sz}"/><w:szCs w:val="{sz}"/>"#));
        }
        out.push_str("</w:rPr>");
    }
    push_run_text(out, &run.text.replace("\r\n", "\n"));
    out.push_str("</w:r>");
}

fn push_paragraph(out: &mut String, paragraph: &Paragraph) {
    out.push_str("<w:p>");
    if let Some(after) = paragraph.space_after_pt {
        out.push_str(&format!(
            r#"<w:pPr><w:spacing w:after="{}"/></w:pPr>"#,
            twips(after)
        ));
    }
    for run in &paragraph.runs {
        push_run(out, run);
    }
    out.push_str("</w:p>");
}

fn push_heading(out: &mut String, level: u8, text: &str) {
    out.push_str(&format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr>"#,
        heading_style_id(level)
    ));
    push_run(out, &Run::new(text));
    out.push_str("</w:p>");
}

/// `word/document.xml`
pub fn document_xml(document: &Document) -> String {
    let mut body = String::new();
    for block in &document.blocks {
        match block {
            Block::Heading { level, text } => push_heading(&mut body, *level, text),
            Block::Paragraph(paragraph) => push_paragraph(&mut body, paragraph),
        }
    }

    format!(
        r#"{XML_DECLARATION}
<w:document xmlns:w="{WORD_NAMESPACE}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <w:body>{body}<w:sectPr>
      <w:pgSz w:w="11906" w:h="16838"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>
      <w:cols w:space="720"/>
    </w:sectPr>
  </w:body>
</w:document>"#
    )
}

fn heading_style_xml(level: u8, size_pt: f32, color: &str) -> String {
    let style_id = heading_style_id(level);
    let name = if level == 0 {
        "Title".to_string()
    } else {
        format!("heading {}", level)
    };
    let outline = if level == 0 {
        String::new()
    } else {
        format!(r#"<w:outlineLvl w:val="{}"/>"#, level - 1)
    };
    let sz = half_points(size_pt);

    format!(
        r#"<w:style w:type="paragraph" w:styleId="{style_id}">
    <w:name w:val="{name}"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/>{outline}</w:pPr>
    <w:rPr><w:b/><w:bCs/><w:color w:val="{color}"/><w:sz w:val="{sz}"/><w:szCs w:val="{sz}"/></w:rPr>
  </w:style>"#
    )
}

/// `word/styles.xml` with the default font applied to Normal
pub fn styles_xml(font: &FontSpec) -> String {
    let name = escape_text(&font.name);
    let sz = half_points(font.size_pt);
    let headings: String = [(0, 26.0, "17365D"), (1, 14.0, "365F91"), (2, 13.0, "4F81BD"), (3, 11.0, "4F81BD")]
        .iter()
        .map(|(level, size, color)| heading_style_xml(*level, *size, color))
        .collect::<Vec<_>>()
        .join("\n  ");

    format!(
        r#"{XML_DECLARATION}
<w:styles xmlns:w="{WORD_NAMESPACE}">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:ascii="{name}" w:hAnsi="{name}" w:eastAsia="{name}" w:cs="{name}"/><w:sz w:val="{sz}"/><w:szCs w:val="{sz}"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="0"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
    <w:rPr><w:rFonts w:ascii="{name}" w:hAnsi="{name}" w:eastAsia="{name}" w:cs="{name}"/><w:sz w:val="{sz}"/><w:szCs w:val="{sz}"/></w:rPr>
  </w:style>
  {headings}
</w:styles>"#
    )
}

/// `docProps/core.xml`
pub fn core_xml(title: Option<&str>, created: DateTime<Utc>) -> String {
    let title = title
        .map(|t| format!("<dc:title>{}</dc:title>", escape_text(t)))
        .unwrap_or_default();
    let created = created.format("%Y-%m-%dT%H:%M:%SZ");

    format!(
        r#"{XML_DECLARATION}
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  {title}
  <dc:creator>docalign</dc:creator>
  <dcterms:created xsi:type="dcterms:W3CDTF">{created}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{created}</dcterms:modified>
</cp:coreProperties>"#
    )
}

/// `docProps/app.xml`
pub fn app_xml() -> String {
    format!(
        r#"{XML_DECLARATION}
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">
  <Application>docalign {}</Application>
</Properties>"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// `[Content_Types].xml`
pub fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#
}

/// `_rels/.rels`
pub fn package_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#
}

/// `word/_rels/document.xml.rels`
pub fn document_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#
}
