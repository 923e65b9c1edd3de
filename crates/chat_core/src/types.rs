//! Request-side domain types
//!
//! Both pipelines validate their input here before any network call:
//! text queries must carry a non-empty drug name, image queries must
//! carry bytes that decode to a supported raster format.

use crate::error::ChatError;
use image::ImageFormat;

/// Normalize a drug-name query. Surrounding whitespace is trimmed and
/// empty input is rejected before any external call is made.
pub fn normalized_drug_name(input: &str) -> Result<String, ChatError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ChatError::Validation(
            "drug name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// A validated image upload ready for the vision pipeline.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// Raw encoded bytes exactly as uploaded (PNG or JPEG).
    pub bytes: Vec<u8>,
    /// MIME type matching the sniffed format.
    pub mime_type: String,
}

impl ImagePayload {
    /// Validate uploaded bytes: sniff the container format, accept only
    /// PNG and JPEG, and verify the data decodes to a raster image.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ChatError> {
        if bytes.is_empty() {
            return Err(ChatError::Validation(
                "no image data provided".to_string(),
            ));
        }

        let format = image::guess_format(&bytes).map_err(|_| {
            ChatError::Validation("file is not a recognized image".to_string())
        })?;

        let mime_type = match format {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            other => {
                return Err(ChatError::Validation(format!(
                    "unsupported image format {:?}; upload png, jpg, or jpeg",
                    other
                )))
            }
        };

        // Full decode so a truncated or corrupt file is caught here
        // rather than at the service boundary.
        image::load_from_memory_with_format(&bytes, format)
            .map_err(|err| ChatError::Validation(format!("image failed to decode: {}", err)))?;

        Ok(Self {
            bytes,
            mime_type: mime_type.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn encoded_image(format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_drug_name_is_trimmed() {
        assert_eq!(normalized_drug_name("  Nicotine ").unwrap(), "Nicotine");
    }

    #[test]
    fn test_empty_drug_name_is_rejected() {
        assert!(matches!(
            normalized_drug_name("   "),
            Err(ChatError::Validation(_))
        ));
    }

    #[test]
    fn test_png_upload_is_accepted() {
        let payload = ImagePayload::from_bytes(encoded_image(ImageFormat::Png)).unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert!(!payload.bytes.is_empty());
    }

    #[test]
    fn test_jpeg_upload_is_accepted() {
        let payload = ImagePayload::from_bytes(encoded_image(ImageFormat::Jpeg)).unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        assert!(matches!(
            ImagePayload::from_bytes(Vec::new()),
            Err(ChatError::Validation(_))
        ));
    }

    #[test]
    fn test_non_image_bytes_are_rejected() {
        let result = ImagePayload::from_bytes(b"definitely not an image".to_vec());
        assert!(matches!(result, Err(ChatError::Validation(_))));
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        let result = ImagePayload::from_bytes(encoded_image(ImageFormat::Bmp));
        match result {
            Err(ChatError::Validation(msg)) => assert!(msg.contains("unsupported")),
            other => panic!("expected validation error, got {:?}", other.map(|p| p.mime_type)),
        }
    }

    #[test]
    fn test_truncated_png_is_rejected() {
        let mut bytes = encoded_image(ImageFormat::Png);
        bytes.truncate(bytes.len() / 2);
        assert!(matches!(
            ImagePayload::from_bytes(bytes),
            Err(ChatError::Validation(_))
        ));
    }
}
