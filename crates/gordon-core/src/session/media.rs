use crate::constants::defaults;
use crate::error::ClientError;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

pub fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&JPEG_MAGIC)
}

/// Normalise picked image bytes to JPEG, the only format the upload step
/// declares. JPEG input passes through untouched; anything else the `image`
/// crate can decode is re-encoded at quality 80 with alpha dropped.
pub fn to_jpeg(bytes: &[u8]) -> Result<Vec<u8>, ClientError> {
    if bytes.is_empty() {
        return Err(ClientError::ImageEncodingFailed("image is empty".into()));
    }
    if is_jpeg(bytes) {
        return Ok(bytes.to_vec());
    }

    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ClientError::ImageEncodingFailed(e.to_string()))?;

    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, defaults::JPEG_QUALITY);
    encoder
        .encode_image(&DynamicImage::ImageRgb8(decoded.to_rgb8()))
        .map_err(|e| ClientError::ImageEncodingFailed(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = ImageBuffer::from_pixel(4, 4, Rgba([200u8, 30, 30, 128]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
        buf
    }

    #[test]
    fn test_png_is_reencoded_as_jpeg() {
        let png = png_bytes();
        assert!(!is_jpeg(&png));
        let jpeg = to_jpeg(&png).unwrap();
        assert!(is_jpeg(&jpeg));
    }

    #[test]
    fn test_jpeg_passes_through() {
        let jpeg = to_jpeg(&png_bytes()).unwrap();
        assert_eq!(to_jpeg(&jpeg).unwrap(), jpeg);
    }

    #[test]
    fn test_garbage_fails() {
        let err = to_jpeg(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ClientError::ImageEncodingFailed(_)));
    }

    #[test]
    fn test_empty_fails() {
        assert!(matches!(
            to_jpeg(&[]),
            Err(ClientError::ImageEncodingFailed(_))
        ));
    }
}
