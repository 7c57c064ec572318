//! Report document access.
//!
//! A `.docx` file is a zip container whose paragraph text lives in
//! `word/document.xml`. This module extracts the non-empty paragraph
//! texts in document order, which is all the downstream parser needs.

pub mod parser;

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::read::ZipArchive;

/// Zip entry holding the document body.
const DOCUMENT_PART: &str = "word/document.xml";

/// Read the ordered sequence of non-empty paragraph texts from a
/// `.docx` file. The archive handle is released before returning.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open document: {}", path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Not a valid document container: {}", path.display()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("No {} part in {}", DOCUMENT_PART, path.display()))?
        .read_to_string(&mut xml)
        .context("Failed to read document body")?;

    paragraphs_from_xml(&xml)
}

/// Collect paragraph (`w:p`) texts from the document XML, skipping
/// paragraphs that are empty after trimming.
fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event().context("Malformed document XML")? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => current.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Text(t) if in_text => {
                current.push_str(&t.unescape().context("Bad text encoding")?);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let text = current.trim();
                    if !text.is_empty() {
                        paragraphs.push(text.to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
