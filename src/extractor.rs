use crate::errors::ExtractionError;

pub const DEFAULT_MAX_TEXT_CHARS: usize = 200_000;

/// Text pulled out of a PDF, already normalized and truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    /// Every page in the page tree, whether or not it yielded text.
    pub page_count: usize,
}

#[derive(Debug, Clone)]
pub struct PdfExtractor {
    max_chars: usize,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TEXT_CHARS)
    }
}

impl PdfExtractor {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Parse `bytes` as a PDF and return its text in page order.
    ///
    /// A page whose text cannot be extracted contributes nothing; only a
    /// document-level parse failure is an error.
    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let doc = lopdf::Document::load_mem(bytes)?;

        // BTreeMap keyed by page number, so iteration is already in page order
        let pages = doc.get_pages();
        let page_count = pages.len();

        let mut raw = String::new();
        for page_num in pages.keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(page_text) => {
                    // Page boundary counts as whitespace
                    raw.push_str(&page_text);
                    raw.push('\n');
                }
                Err(e) => {
                    tracing::debug!("No text extracted from page {}: {}", page_num, e);
                }
            }
        }

        let text = truncate_chars(&normalize_whitespace(&raw), self.max_chars).to_string();

        tracing::debug!("Extracted {} bytes of text from {} pages", text.len(), page_count);

        Ok(ExtractedText { text, page_count })
    }
}

/// Collapse every run of whitespace into a single ASCII space and trim both
/// ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `max_chars` characters of `text` (characters, not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
