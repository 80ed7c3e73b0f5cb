//! Document text decoding. Turns uploaded bytes into plain text; everything after
//! this point only sees strings.

use std::path::Path;

use crate::extraction::ExtractionError;

/// Decodes one document into plain text. Carried in `AppState` as
/// `Arc<dyn TextExtractor>` so the decoding backend can be swapped.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, file_name: &str, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Default decoder: PDF via `pdf-extract`, plain text and markdown as UTF-8.
pub struct DocumentTextExtractor;

impl TextExtractor for DocumentTextExtractor {
    fn extract_text(&self, file_name: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
        let extension = Path::new(file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());

        let text = match extension.as_deref() {
            Some("pdf") => pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| ExtractionError::Decode(format!("{file_name}: {e}")))?,
            None | Some("txt") | Some("text") | Some("md") => {
                String::from_utf8_lossy(bytes).into_owned()
            }
            Some(other) => {
                return Err(ExtractionError::Decode(format!(
                    "{file_name}: unsupported document type '.{other}'"
                )))
            }
        };

        Ok(text.trim().to_string())
    }
}
