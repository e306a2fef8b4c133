// Resume Analyzer: one resume against one job description.
// Resume text comes from paste, PDF/TXT upload, or image OCR (see crate::files).

pub mod analysis;
pub mod handlers;
pub mod models;
pub mod prompts;
