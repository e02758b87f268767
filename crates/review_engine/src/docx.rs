//! Minimal WordprocessingML package writer.
//!
//! Produces a `.docx` with one heading style, plain paragraphs and a bullet
//! list style backed by a single numbering definition.

use std::io::{self, Cursor, Write};

use thiserror::Error;
use xml::common::XmlVersion;
use xml::writer::{EmitterConfig, EventWriter, XmlEvent};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::{Block, ReviewDocument};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub(crate) const HEADING_STYLE: &str = "Heading1";
pub(crate) const BULLET_STYLE: &str = "ListBullet";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:eastAsia="Microsoft JhengHei"/><w:sz w:val="22"/></w:rPr></w:rPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:pPr><w:spacing w:after="120"/></w:pPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:color w:val="1F3864"/><w:sz w:val="32"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:numPr><w:numId w:val="1"/></w:numPr></w:pPr></w:style></w:styles>"#;

const NUMBERING: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("xml error: {0}")]
    Xml(#[from] xml::writer::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Serializes `doc` into the bytes of a `.docx` package.
pub fn render_docx(doc: &ReviewDocument) -> Result<Vec<u8>, DocxError> {
    let document = render_document_xml(doc)?;
    let parts: [(&str, &[u8]); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
        ("word/document.xml", &document),
        ("word/styles.xml", STYLES.as_bytes()),
        ("word/numbering.xml", NUMBERING.as_bytes()),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body)?;
    }
    Ok(zip.finish()?.into_inner())
}

fn render_document_xml(doc: &ReviewDocument) -> Result<Vec<u8>, DocxError> {
    let mut buffer = Vec::new();
    {
        let mut writer = EmitterConfig::new()
            .perform_indent(false)
            .write_document_declaration(false)
            .create_writer(&mut buffer);
        writer.write(XmlEvent::StartDocument {
            version: XmlVersion::Version10,
            encoding: Some("UTF-8"),
            standalone: Some(true),
        })?;
        writer.write(XmlEvent::start_element("w:document").ns("w", W_NS))?;
        writer.write(XmlEvent::start_element("w:body"))?;

        write_paragraph(&mut writer, Some(HEADING_STYLE), &doc.heading)?;
        for block in &doc.blocks {
            match block {
                Block::Bullet(text) => write_paragraph(&mut writer, Some(BULLET_STYLE), text)?,
                Block::Paragraph(text) => write_paragraph(&mut writer, None, text)?,
            }
        }

        write_section(&mut writer)?;
        writer.write(XmlEvent::end_element())?; // w:body
        writer.write(XmlEvent::end_element())?; // w:document
    }
    Ok(buffer)
}

fn write_paragraph<W: Write>(
    writer: &mut EventWriter<W>,
    style: Option<&str>,
    text: &str,
) -> Result<(), DocxError> {
    writer.write(XmlEvent::start_element("w:p"))?;
    if let Some(style) = style {
        writer.write(XmlEvent::start_element("w:pPr"))?;
        writer.write(XmlEvent::start_element("w:pStyle").attr("w:val", style))?;
        writer.write(XmlEvent::end_element())?;
        writer.write(XmlEvent::end_element())?;
    }
    if !text.is_empty() {
        writer.write(XmlEvent::start_element("w:r"))?;
        writer.write(XmlEvent::start_element("w:t").attr("xml:space", "preserve"))?;
        writer.write(XmlEvent::characters(text))?;
        writer.write(XmlEvent::end_element())?;
        writer.write(XmlEvent::end_element())?;
    }
    writer.write(XmlEvent::end_element())?;
    Ok(())
}

/// A4 portrait with one-inch margins.
fn write_section<W: Write>(writer: &mut EventWriter<W>) -> Result<(), DocxError> {
    writer.write(XmlEvent::start_element("w:sectPr"))?;
    writer.write(
        XmlEvent::start_element("w:pgSz")
            .attr("w:w", "11906")
            .attr("w:h", "16838"),
    )?;
    writer.write(XmlEvent::end_element())?;
    writer.write(
        XmlEvent::start_element("w:pgMar")
            .attr("w:top", "1440")
            .attr("w:right", "1440")
            .attr("w:bottom", "1440")
            .attr("w:left", "1440"),
    )?;
    writer.write(XmlEvent::end_element())?;
    writer.write(XmlEvent::end_element())?;
    Ok(())
}
