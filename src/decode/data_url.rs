//! `data:` URL encoding for decal payloads.

use super::DecodeError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Splits a base64 data URL into its MIME type and raw bytes.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), DecodeError> {
    let rest = url.strip_prefix("data:").ok_or(DecodeError::MalformedDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(DecodeError::MalformedDataUrl)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(DecodeError::MalformedDataUrl)?;
    let bytes = STANDARD.decode(payload.trim())?;
    Ok((mime.to_string(), bytes))
}

/// Decodes a data URL all the way to RGBA pixels for upload to the GPU.
pub fn rgba_from_data_url(url: &str) -> Result<image::RgbaImage, DecodeError> {
    let (_, bytes) = decode_data_url(url)?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_bytes;
    use crate::decode::tests::png_bytes;

    #[test]
    fn test_split_data_url() {
        let url = encode_data_url("image/png", b"abc");
        assert_eq!(url, "data:image/png;base64,YWJj");
        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"abc");
    }

    #[test]
    fn test_rejects_non_base64_urls() {
        assert!(decode_data_url("data:text/plain,hello").is_err());
        assert!(decode_data_url("http://example.com/a.png").is_err());
        assert!(decode_data_url("data:image/png;base64,***").is_err());
    }

    #[test]
    fn test_pixels_survive_encoding() {
        let url = decode_bytes(&png_bytes(3, 2, [10, 20, 30, 255])).unwrap();
        let img = rgba_from_data_url(&url).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30, 255]);
    }
}
