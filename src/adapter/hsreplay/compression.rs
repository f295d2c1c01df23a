//! Payload Compression
//!
//! gzip compression of the joined log text

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

use crate::domain::entities::upload_result::UploadError;

/// Value of the `Content-Encoding` header matching [`gzip`]
pub const CONTENT_ENCODING: &str = "gzip";

/// Compress the log text with gzip
pub fn gzip(text: &str) -> Result<Vec<u8>, UploadError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(text.as_bytes())
        .map_err(|e| UploadError::CompressionFailure(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| UploadError::CompressionFailure(e.to_string()))
}
