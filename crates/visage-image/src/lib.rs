//! Visage image pipeline - avatar downscaling and preview generation.
//!
//! Uploaded images are decoded, downscaled so neither dimension exceeds
//! a per-call-site maximum, and re-encoded as JPEG. Preprocessing is
//! best-effort: a file that fails to decode or re-encode is forwarded
//! unmodified rather than blocking the upload. Every result carries a
//! `data:` URL preview for immediate display before any network call.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

/// Per-call-site resize parameters.
///
/// The two call sites are independent presets, not a unified setting:
/// the profile-edit path and the banner path were tuned separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOptions {
    /// Neither output dimension exceeds this. Downscale only.
    pub max_dimension: u32,
    /// JPEG quality factor, 0-100.
    pub jpeg_quality: u8,
}

impl ResizeOptions {
    /// Profile-edit avatar path.
    pub const AVATAR: Self = Self {
        max_dimension: 512,
        jpeg_quality: 80,
    };

    /// Profile banner path.
    pub const BANNER: Self = Self {
        max_dimension: 800,
        jpeg_quality: 90,
    };
}

/// Outcome of preprocessing one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    /// Bytes to upload: re-encoded JPEG, or the original file when
    /// preprocessing fell back.
    pub bytes: Vec<u8>,
    /// Content type of `bytes`.
    pub content_type: String,
    /// `data:` URL of `bytes` for on-screen preview.
    pub preview: String,
    /// Whether the downscale/re-encode path actually ran.
    pub resized: bool,
}

/// Downscale and re-encode an upload, falling back to the original
/// bytes if the image cannot be processed.
///
/// Validation (type allow-list, size cap) is the caller's concern and
/// must happen before this runs; a file that reaches this function is
/// uploaded either way.
pub fn preprocess(bytes: &[u8], content_type: &str, opts: ResizeOptions) -> ProcessedImage {
    match resize_to_jpeg(bytes, opts) {
        Ok(jpeg) => ProcessedImage {
            preview: data_url("image/jpeg", &jpeg),
            bytes: jpeg,
            content_type: "image/jpeg".to_string(),
            resized: true,
        },
        Err(err) => {
            tracing::warn!("image preprocessing failed, forwarding original file: {err}");
            ProcessedImage {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
                preview: data_url(content_type, bytes),
                resized: false,
            }
        }
    }
}

/// Integer output dimensions for a downscale capped at `max` on the
/// longer side. Images already within the cap keep their dimensions -
/// never upscale.
pub fn fit_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width > height {
        if width > max {
            let scaled = (u64::from(height) * u64::from(max) / u64::from(width)) as u32;
            (max, scaled.max(1))
        } else {
            (width, height)
        }
    } else if height > max {
        let scaled = (u64::from(width) * u64::from(max) / u64::from(height)) as u32;
        (scaled.max(1), max)
    } else {
        (width, height)
    }
}

fn resize_to_jpeg(bytes: &[u8], opts: ResizeOptions) -> Result<Vec<u8>, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let (width, height) = fit_dimensions(decoded.width(), decoded.height(), opts.max_dimension);
    let scaled = decoded.resize_exact(width, height, FilterType::Triangle);

    // JPEG has no alpha channel.
    let rgb = scaled.to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, opts.jpeg_quality).encode_image(&rgb)?;
    Ok(out)
}

fn data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([120, 80, 200]),
        ));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn landscape_is_capped_on_width() {
        assert_eq!(fit_dimensions(1024, 512, 512), (512, 256));
    }

    #[test]
    fn portrait_is_capped_on_height() {
        assert_eq!(fit_dimensions(300, 900, 512), (170, 512));
    }

    #[test]
    fn small_image_is_never_upscaled() {
        assert_eq!(fit_dimensions(64, 64, 512), (64, 64));
        assert_eq!(fit_dimensions(511, 200, 512), (511, 200));
    }

    #[test]
    fn extreme_aspect_ratio_keeps_at_least_one_pixel() {
        let (w, h) = fit_dimensions(10_000, 2, 512);
        assert_eq!(w, 512);
        assert!(h >= 1);
    }

    #[test]
    fn oversized_png_is_downscaled_and_reencoded() {
        let input = png_bytes(1024, 768);
        let result = preprocess(&input, "image/png", ResizeOptions::AVATAR);

        assert!(result.resized);
        assert_eq!(result.content_type, "image/jpeg");
        assert!(result.preview.starts_with("data:image/jpeg;base64,"));

        let output = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!(output.width(), 512);
        assert_eq!(output.height(), 384);
    }

    #[test]
    fn image_within_cap_keeps_its_dimensions() {
        let input = png_bytes(200, 100);
        let result = preprocess(&input, "image/png", ResizeOptions::AVATAR);

        assert!(result.resized);
        let output = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!((output.width(), output.height()), (200, 100));
    }

    #[test]
    fn banner_preset_caps_at_800() {
        let input = png_bytes(1600, 400);
        let result = preprocess(&input, "image/png", ResizeOptions::BANNER);

        let output = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!((output.width(), output.height()), (800, 200));
    }

    #[test]
    fn undecodable_file_falls_back_to_original_bytes() {
        let input = b"GIF89a but not really a gif".to_vec();
        let result = preprocess(&input, "image/gif", ResizeOptions::AVATAR);

        assert!(!result.resized);
        assert_eq!(result.bytes, input);
        assert_eq!(result.content_type, "image/gif");
        assert!(result.preview.starts_with("data:image/gif;base64,"));
    }

    #[test]
    fn preview_encodes_the_forwarded_bytes() {
        let input = png_bytes(32, 32);
        let result = preprocess(&input, "image/png", ResizeOptions::AVATAR);

        let encoded = result.preview.strip_prefix("data:image/jpeg;base64,").unwrap();
        assert_eq!(BASE64.decode(encoded).unwrap(), result.bytes);
    }
}
