//! The two pure steps between a live video frame and the uploaded photo.
//!
//! [`rasterize`] freezes a frame at the fixed capture size so framing is the
//! same on every device; [`compress`] then shrinks it independently for
//! transmission. Each step takes and returns plain bytes/images and can be
//! run on its own.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{load_from_memory, DynamicImage, GenericImageView, ImageFormat};
use log::{debug, warn};

/// Quality decrement used when a re-encode comes out larger than its source.
const QUALITY_STEP: u8 = 10;

use crate::config::CaptureConfig;
use crate::error::CaptureError;
use crate::photo::CapturedPhoto;

/// Draws `frame` onto a `frame_width` x `frame_height` surface (stretching
/// like a canvas `drawImage` into fixed dimensions) and encodes it as JPEG at
/// `frame_quality`.
pub fn rasterize(frame: &DynamicImage, config: &CaptureConfig) -> Result<Vec<u8>, CaptureError> {
    let (width, height) = (config.frame_width.max(1), config.frame_height.max(1));
    let surface = if frame.dimensions() == (width, height) {
        frame.clone()
    } else {
        frame.resize_exact(width, height, FilterType::Triangle)
    };
    encode_jpeg(&surface, config.frame_quality)
}

/// Decodes any supported image, scales it so its longer edge is at most
/// `max_edge` (never upscaling), and re-encodes it as JPEG at
/// `upload_quality`.
///
/// The result is never larger than the input. When the input is already a
/// JPEG that needed no scaling, a bigger re-encode is replaced by the input
/// bytes; otherwise the quality is lowered in steps until it fits. Only an
/// input smaller than a quality-1 JPEG can end up larger, which is logged.
pub fn compress(encoded: &[u8], config: &CaptureConfig) -> Result<CapturedPhoto, CaptureError> {
    let img = load_from_memory(encoded)?;
    let (orig_w, orig_h) = img.dimensions();
    let max_edge = config.max_edge.max(1) as f64;

    let scale = (max_edge / orig_w as f64)
        .min(max_edge / orig_h as f64)
        .min(1.0);

    let resized = if scale >= 1.0 {
        img
    } else {
        let new_w = (orig_w as f64 * scale).round().max(1.0) as u32;
        let new_h = (orig_h as f64 * scale).round().max(1.0) as u32;
        img.resize_exact(new_w, new_h, FilterType::Lanczos3)
    };
    let (width, height) = resized.dimensions();

    let mut quality = config.upload_quality.clamp(1, 100);
    let mut bytes = encode_jpeg(&resized, quality)?;
    if bytes.len() > encoded.len() {
        if scale >= 1.0 && is_jpeg(encoded) {
            bytes = encoded.to_vec();
        } else {
            while bytes.len() > encoded.len() && quality > 1 {
                quality = quality.saturating_sub(QUALITY_STEP).max(1);
                bytes = encode_jpeg(&resized, quality)?;
            }
            if bytes.len() > encoded.len() {
                warn!(
                    "compressed photo is still larger than its source ({} > {} bytes) at quality {quality}",
                    bytes.len(),
                    encoded.len()
                );
            }
        }
    }

    let before_kb = encoded.len() as f64 / 1024.0;
    let after_kb = bytes.len() as f64 / 1024.0;
    let saved = if encoded.is_empty() {
        0.0
    } else {
        (1.0 - bytes.len() as f64 / encoded.len() as f64) * 100.0
    };
    debug!(
        "Image compressed: {before_kb:.1}KB -> {after_kb:.1}KB ({saved:.0}% smaller), {orig_w}x{orig_h} -> {width}x{height}"
    );

    Ok(CapturedPhoto::new(bytes, width, height))
}

fn is_jpeg(bytes: &[u8]) -> bool {
    matches!(image::guess_format(bytes), Ok(ImageFormat::Jpeg))
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, CaptureError> {
    // JPEG has no alpha channel; flatten to RGB first.
    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
        encoder.encode_image(&rgb)?;
    }
    Ok(out)
}
