use std::fmt;

/// Pages beyond this are ignored; giant scanned manuals would otherwise
/// stall the admin flow.
const PAGE_CAP: usize = 100;

/// Why a PDF yielded no usable text. The two cases read differently to the
/// user: one is a broken file, the other a file with nothing to extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The file could not be opened or parsed as a PDF at all.
    Unreadable(String),
    /// The document parsed but held no extractable text (e.g. pure scans).
    NoText,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Unreadable(msg) => write!(
                f,
                "The PDF could not be read; it may be corrupted or protected ({msg})."
            ),
            ExtractError::NoText => write!(f, "No readable text found in the PDF."),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Concatenates the text of every page (up to the cap) into one plain
/// string, pages separated by newlines. Pages that fail individually are
/// skipped; only a fully text-free document is an error.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc =
        lopdf::Document::load_mem(bytes).map_err(|e| ExtractError::Unreadable(e.to_string()))?;

    let mut text = String::new();
    for (&page_number, _) in doc.get_pages().iter().take(PAGE_CAP) {
        match doc.extract_text(&[page_number]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => log::warn!("skipping PDF page {page_number}: {e}"),
        }
    }

    if text.trim().is_empty() {
        return Err(ExtractError::NoText);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_unreadable_not_empty() {
        let err = extract_pdf_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable(_)));
    }

    #[test]
    fn the_two_failure_modes_read_differently() {
        let unreadable = ExtractError::Unreadable("broken xref".into()).to_string();
        let empty = ExtractError::NoText.to_string();
        assert_ne!(unreadable, empty);
        assert!(empty.contains("No readable text"));
    }
}
