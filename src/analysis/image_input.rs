//! Chart image loading and format sniffing.

use crate::analysis::AnalysisError;
use image::ImageFormat;
use std::fs;
use std::path::Path;

/// MIME type of an image, sniffed from its leading bytes.
pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes).ok()? {
        format @ (ImageFormat::Png
        | ImageFormat::Jpeg
        | ImageFormat::Gif
        | ImageFormat::WebP
        | ImageFormat::Bmp) => Some(format.to_mime_type()),
        _ => None,
    }
}

/// Read an image file and sniff its MIME type.
pub fn load_image(path: &Path) -> Result<(Vec<u8>, &'static str), AnalysisError> {
    let bytes = fs::read(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mime = detect_image_mime(&bytes).ok_or(AnalysisError::UnsupportedImage)?;
    Ok((bytes, mime))
}
