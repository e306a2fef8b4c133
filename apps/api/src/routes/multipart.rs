//! Multipart upload reading shared by the analyzer and ranker upload routes.

use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;
use crate::files::UploadedFile;

/// Collects every file part of the form. Parts without a file name are skipped.
pub async fn read_uploads(mut multipart: Multipart) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let Some(name) = field.file_name().map(str::to_string) else {
            debug!("Skipping non-file multipart field {:?}", field.name());
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Could not read '{name}': {e}")))?;
        files.push(UploadedFile::new(name, content_type, bytes));
    }

    if files.is_empty() {
        return Err(AppError::Validation("No file was uploaded".to_string()));
    }
    Ok(files)
}
