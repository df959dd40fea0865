use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{DocumentKind, ResolutionError};

const DOCUMENT_PART: &str = "word/document.xml";

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:p(?:\s[^>]*[^/>])?>.*?</w:p>|<w:p(?:\s[^>]*)?/>")
        .expect("paragraph pattern is valid")
});

static RUN_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab/>|<w:br(?:\s[^>]*)?/>")
        .expect("run pattern is valid")
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(amp|lt|gt|quot|apos|#[0-9]+|#x[0-9a-fA-F]+);").expect("entity pattern is valid")
});

pub(super) fn pdf_text(bytes: &[u8]) -> Result<String, ResolutionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|err| ResolutionError::Decode {
        kind: DocumentKind::Pdf,
        reason: err.to_string(),
    })
}

/// Paragraph text of the main document part, one paragraph per line.
pub(super) fn word_text(bytes: &[u8]) -> Result<String, ResolutionError> {
    let decode_error = |reason: String| ResolutionError::Decode {
        kind: DocumentKind::WordProcessing,
        reason,
    };

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|err| decode_error(err.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|err| decode_error(format!("{DOCUMENT_PART}: {err}")))?
        .read_to_string(&mut xml)
        .map_err(|err| decode_error(err.to_string()))?;

    let paragraphs: Vec<String> = PARAGRAPH
        .find_iter(&xml)
        .map(|paragraph| paragraph_text(paragraph.as_str()))
        .collect();
    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &str) -> String {
    RUN_TOKEN
        .captures_iter(paragraph)
        .map(|token| match token.get(1) {
            Some(text) => unescape(text.as_str()),
            None if token[0].starts_with("<w:tab") => "\t".to_string(),
            None => "\n".to_string(),
        })
        .collect()
}

fn unescape(text: &str) -> String {
    ENTITY
        .replace_all(text, |entity: &Captures<'_>| match &entity[1] {
            "amp" => "&".to_string(),
            "lt" => "<".to_string(),
            "gt" => ">".to_string(),
            "quot" => "\"".to_string(),
            "apos" => "'".to_string(),
            reference => numeric_reference(reference).unwrap_or_else(|| entity[0].to_string()),
        })
        .into_owned()
}

fn numeric_reference(reference: &str) -> Option<String> {
    let code = match reference.strip_prefix("#x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => reference.strip_prefix('#')?.parse().ok()?,
    };
    char::from_u32(code).map(String::from)
}
