//! Decoding of images posted by the browser as data URLs
//! (`data:<mime>;base64,<payload>`).

use crate::{Error, Result, llm::ImagePayload};
use base64::{Engine as _, engine::general_purpose};
use image::ImageFormat;
use std::io::Cursor;
use tracing::debug;

/// Splits a data URL at its first comma, returning the declared header and
/// the encoded body.
pub fn split(data_url: &str) -> Result<(&str, &str)> {
    data_url
        .split_once(',')
        .ok_or_else(|| Error::data_url("expected '<header>,<base64 payload>'"))
}

/// Extracts the MIME type from a header such as `data:image/jpeg;base64`.
pub fn declared_mime_type(header: &str) -> Option<&str> {
    let mime = header
        .strip_prefix("data:")?
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();

    if mime.is_empty() { None } else { Some(mime) }
}

/// Formats Gemini accepts as inline image data. Anything else is re-encoded
/// as PNG before it is sent upstream.
const UPSTREAM_FORMATS: [ImageFormat; 3] =
    [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// Decodes a data URL into image bytes, checking that they form an image the
/// `image` crate can read. The MIME type is taken from the bytes rather than
/// the header. ASCII whitespace inside the payload is ignored.
pub fn decode_image(data_url: &str) -> Result<ImagePayload> {
    let (header, payload) = split(data_url)?;
    let payload: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let bytes = general_purpose::STANDARD.decode(payload)?;

    let format = image::guess_format(&bytes)?;
    let decoded = image::load_from_memory_with_format(&bytes, format)?;

    debug!(
        declared = declared_mime_type(header).unwrap_or("none"),
        detected = format.to_mime_type(),
        width = decoded.width(),
        height = decoded.height(),
        "Decoded image payload"
    );

    if UPSTREAM_FORMATS.contains(&format) {
        return Ok(ImagePayload::new(format.to_mime_type(), bytes));
    }

    let mut png_bytes = Vec::new();
    decoded.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)?;
    debug!(from = format.to_mime_type(), "Re-encoded image payload as PNG");

    Ok(ImagePayload::new(ImageFormat::Png.to_mime_type(), png_bytes))
}

/// Runs [`decode_image`] on tokio's blocking pool.
pub async fn decode_image_blocking(data_url: String) -> Result<ImagePayload> {
    tokio::task::spawn_blocking(move || decode_image(&data_url)).await?
}
