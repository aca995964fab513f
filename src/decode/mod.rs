//! Image decoding for decal uploads.
//!
//! Picked files are read and validated on a dedicated thread, then handed
//! back as `data:` URLs on the bus. The logic thread turns each success into
//! one `add_decal`; a failure drops the pending add.

pub mod data_url;

use crate::system::bus::SystemBus;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use thiserror::Error;

pub use data_url::{decode_data_url, encode_data_url, rgba_from_data_url};

/// Extensions offered by the file dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("cannot read image: {0}")]
    Io(#[from] io::Error),

    #[error("cannot decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported image format: {0}")]
    Unsupported(String),

    #[error("malformed data URL")]
    MalformedDataUrl,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodeRequest {
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum DecodeOutcome {
    Decoded { path: PathBuf, data_url: String },
    Failed { path: PathBuf, error: DecodeError },
}

/// Maps a sniffed format to the MIME type used in the data URL.
fn mime_type(format: image::ImageFormat) -> Option<&'static str> {
    use image::ImageFormat;
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Bmp => Some("image/bmp"),
        _ => None,
    }
}

/// Validates encoded image bytes and wraps them in a data URL.
///
/// The file's own encoding is kept; decoding only proves the bytes are a
/// usable image.
pub fn decode_bytes(bytes: &[u8]) -> Result<String, DecodeError> {
    let format = image::guess_format(bytes)?;
    let mime = mime_type(format).ok_or_else(|| DecodeError::Unsupported(format!("{:?}", format)))?;
    image::load_from_memory_with_format(bytes, format)?;
    Ok(encode_data_url(mime, bytes))
}

pub fn decode_file(path: &Path) -> Result<String, DecodeError> {
    let bytes = fs::read(path)?;
    decode_bytes(&bytes)
}

/// Spawns the decode thread.
pub fn start_thread(bus: SystemBus) {
    thread::Builder::new()
        .name("Decode Thread".to_string())
        .spawn(move || {
            log::info!("DECODE: Thread started");

            for request in bus.decode_rx.iter() {
                let outcome = match decode_file(&request.path) {
                    Ok(data_url) => {
                        log::info!(
                            "DECODE: {:?} ready ({} bytes encoded)",
                            request.path,
                            data_url.len()
                        );
                        DecodeOutcome::Decoded {
                            path: request.path,
                            data_url,
                        }
                    }
                    Err(error) => DecodeOutcome::Failed {
                        path: request.path,
                        error,
                    },
                };

                if let Err(e) = bus.decoded_tx.send(outcome) {
                    log::error!("DECODE: Failed to send result (Logic thread died?): {}", e);
                    break;
                }
            }

            log::info!("DECODE: Thread stopped");
        })
        .expect("Failed to spawn Decode thread");
}
