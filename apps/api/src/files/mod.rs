//! File-to-Text Adapter: turns an uploaded resume file into plain text.
//!
//! PDFs go through the text layer, images through the gateway's OCR capability,
//! everything else is decoded as UTF-8. Failures never escape as errors: `convert`
//! always yields text to display, flagged as extracted or as guidance.

pub mod pdf;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{AiGateway, LlmError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Pdf,
    Image,
    Text,
}

impl FileKind {
    /// Classifies by MIME type, falling back to the file extension when the
    /// browser sent no type or a generic one.
    pub fn classify(content_type: Option<&str>, file_name: &str) -> Self {
        match content_type.map(|ct| ct.trim().to_ascii_lowercase()) {
            Some(ct) if ct == "application/pdf" => FileKind::Pdf,
            Some(ct) if ct.starts_with("image/") => FileKind::Image,
            Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => FileKind::Text,
            _ => match extension(file_name).as_deref() {
                Some("pdf") => FileKind::Pdf,
                Some(ext) if image_media_type(ext).is_some() => FileKind::Image,
                _ => FileKind::Text,
            },
        }
    }
}

fn extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn image_media_type(ext: &str) -> Option<&'static str> {
    match ext {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// One file received from the upload surface.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(name: String, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            name,
            content_type,
            bytes,
        }
    }

    pub fn kind(&self) -> FileKind {
        FileKind::classify(self.content_type.as_deref(), &self.name)
    }

    fn image_media_type(&self) -> String {
        match self.content_type.as_deref() {
            Some(ct) if ct.starts_with("image/") => ct.to_string(),
            _ => extension(&self.name)
                .as_deref()
                .and_then(image_media_type)
                .unwrap_or("image/png")
                .to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FileReadError {
    #[error("Error reading PDF: {0}")]
    Pdf(String),

    #[error("No text found in PDF")]
    PdfNoText,

    #[error("Error extracting text from image: {0}")]
    Ocr(#[from] LlmError),

    #[error("No text found in image")]
    ImageNoText,
}

impl FileReadError {
    /// Actionable message shown in place of the file's text.
    pub fn guidance(&self) -> String {
        let advice = match self {
            FileReadError::Pdf(_) => {
                "• Use a different PDF\n• Paste text directly\n• Upload a .txt or image file"
            }
            FileReadError::PdfNoText => {
                "• Use a text-based PDF (not scanned image)\n• Paste text directly instead\n• Upload a .txt file"
            }
            FileReadError::Ocr(_) => {
                "• Use a clearer image\n• Paste text directly\n• Upload a .txt file"
            }
            FileReadError::ImageNoText => {
                "• Use a clearer/higher quality image\n• Paste text directly instead\n• Upload a .txt file"
            }
        };
        format!("{self}. Please try:\n{advice}")
    }
}

/// How a screen treats PDF uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfPolicy {
    /// Read the text layer.
    Extract,
    /// Do not parse; ask for an image or text export instead.
    Advise,
}

pub const PDF_UPLOAD_ADVICE: &str = "PDF Upload: For better reliability, please upload as:\n\
    • Image file (PNG/JPG) - takes screenshot of PDF\n\
    • Text file (.txt) - copy-paste content from PDF\n\
    \n\
    This avoids complex PDF parsing.";

/// Result of converting one file: the text to show and whether it is the file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub text: String,
    pub extracted: bool,
}

impl Converted {
    fn extracted(text: String) -> Self {
        Self {
            text,
            extracted: true,
        }
    }

    fn guidance(text: String) -> Self {
        Self {
            text,
            extracted: false,
        }
    }
}

/// Extracts the text of `file`, dispatching on its kind.
pub async fn to_text(file: &UploadedFile, gateway: &dyn AiGateway) -> Result<String, FileReadError> {
    match file.kind() {
        FileKind::Pdf => pdf::text_layer().extract(file.bytes.to_vec()).await,
        FileKind::Image => {
            let text = gateway
                .image_to_text(&file.bytes, &file.image_media_type())
                .await?;
            if text.trim().is_empty() {
                return Err(FileReadError::ImageNoText);
            }
            Ok(text)
        }
        FileKind::Text => Ok(decode_text(&file.bytes)),
    }
}

/// Converts `file` to displayable text. Never fails: extraction problems become
/// guidance text with `extracted == false`.
pub async fn convert(file: &UploadedFile, gateway: &dyn AiGateway, pdf_policy: PdfPolicy) -> Converted {
    if file.kind() == FileKind::Pdf && pdf_policy == PdfPolicy::Advise {
        info!("PDF '{}' not parsed on this screen; returning upload advice", file.name);
        return Converted::guidance(PDF_UPLOAD_ADVICE.to_string());
    }

    match to_text(file, gateway).await {
        Ok(text) => {
            info!(
                "Extracted {} chars from '{}' ({:?})",
                text.chars().count(),
                file.name,
                file.kind()
            );
            Converted::extracted(text)
        }
        Err(e) => {
            warn!("Could not read '{}': {e}", file.name);
            Converted::guidance(e.guidance())
        }
    }
}

/// Lossy UTF-8 decode; a leading byte-order mark is dropped.
fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGateway;

    fn upload(name: &str, content_type: Option<&str>, bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            content_type: content_type.map(String::from),
            bytes: Bytes::copy_from_slice(bytes),
        }
    }

    #[test]
    fn test_classify_by_mime_type() {
        assert_eq!(FileKind::classify(Some("application/pdf"), "x"), FileKind::Pdf);
        assert_eq!(FileKind::classify(Some("image/png"), "x"), FileKind::Image);
        assert_eq!(FileKind::classify(Some("IMAGE/JPEG"), "x"), FileKind::Image);
        assert_eq!(FileKind::classify(Some("text/plain"), "cv.pdf"), FileKind::Text);
        assert_eq!(
            FileKind::classify(Some("application/msword"), "cv.doc"),
            FileKind::Text
        );
    }

    #[test]
    fn test_classify_falls_back_to_extension() {
        assert_eq!(FileKind::classify(None, "resume.PDF"), FileKind::Pdf);
        assert_eq!(
            FileKind::classify(Some("application/octet-stream"), "scan.jpeg"),
            FileKind::Image
        );
        assert_eq!(FileKind::classify(Some(""), "notes.txt"), FileKind::Text);
        assert_eq!(FileKind::classify(None, "no_extension"), FileKind::Text);
    }

    #[test]
    fn test_image_media_type_prefers_content_type() {
        let file = upload("scan.jpg", Some("image/webp"), b"");
        assert_eq!(file.image_media_type(), "image/webp");
        let file = upload("scan.jpg", None, b"");
        assert_eq!(file.image_media_type(), "image/jpeg");
    }

    #[test]
    fn test_decode_text_strips_bom_and_replaces_invalid_bytes() {
        assert_eq!(decode_text("\u{feff}hello".as_bytes()), "hello");
        assert_eq!(decode_text(&[b'a', 0xff, b'b']), "a\u{fffd}b");
    }

    #[tokio::test]
    async fn test_text_file_is_decoded() {
        let gateway = ScriptedGateway::new();
        let file = upload("a.txt", Some("text/plain"), b"Jane Doe\nRust engineer");
        let converted = convert(&file, &gateway, PdfPolicy::Extract).await;
        assert_eq!(
            converted,
            Converted {
                text: "Jane Doe\nRust engineer".to_string(),
                extracted: true
            }
        );
    }

    #[tokio::test]
    async fn test_image_is_sent_to_ocr() {
        let gateway = ScriptedGateway::new().ocr("John Smith\nGo developer");
        let file = upload("cv.png", Some("image/png"), &[0x89, b'P', b'N', b'G']);
        let text = to_text(&file, &gateway).await.unwrap();
        assert_eq!(text, "John Smith\nGo developer");
    }

    #[tokio::test]
    async fn test_blank_ocr_result_is_soft_failure() {
        let gateway = ScriptedGateway::new().ocr("   \n ");
        let file = upload("cv.png", Some("image/png"), b"img");
        let converted = convert(&file, &gateway, PdfPolicy::Extract).await;
        assert!(!converted.extracted);
        assert!(converted.text.starts_with("No text found in image. Please try:"));
    }

    #[tokio::test]
    async fn test_ocr_rejection_becomes_guidance() {
        let gateway = ScriptedGateway::new().ocr_fail("vision offline");
        let file = upload("cv.jpg", Some("image/jpeg"), b"img");
        let converted = convert(&file, &gateway, PdfPolicy::Extract).await;
        assert!(!converted.extracted);
        assert!(converted.text.contains("vision offline"));
        assert!(converted.text.contains("Use a clearer image"));
    }

    #[tokio::test]
    async fn test_pdf_is_advised_when_policy_says_so() {
        let gateway = ScriptedGateway::new();
        let file = upload("cv.pdf", Some("application/pdf"), b"%PDF-1.4");
        let converted = convert(&file, &gateway, PdfPolicy::Advise).await;
        assert_eq!(converted, Converted::guidance(PDF_UPLOAD_ADVICE.to_string()));
    }

    #[tokio::test]
    async fn test_unreadable_pdf_becomes_guidance() {
        let gateway = ScriptedGateway::new();
        let file = upload("cv.pdf", Some("application/pdf"), b"not really a pdf");
        let converted = convert(&file, &gateway, PdfPolicy::Extract).await;
        assert!(!converted.extracted);
        assert!(converted.text.starts_with("Error reading PDF:"));
        assert!(converted.text.contains("Use a different PDF"));
    }
}
