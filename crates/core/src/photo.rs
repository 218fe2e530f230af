//! Photo upload rules: accepted file types, storage naming, and the
//! resize/flatten/transcode step applied before anything is stored.
//!
//! Every stored photo is a baseline JPEG that fits inside
//! [`MAX_WIDTH`] x [`MAX_HEIGHT`]. Images already inside the box are never
//! upscaled.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::error::CoreError;

/// Extensions accepted on upload (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Bounding box stored photos are shrunk into.
pub const MAX_WIDTH: u32 = 1200;
pub const MAX_HEIGHT: u32 = 800;

/// JPEG quality used for every stored photo.
pub const JPEG_QUALITY: u8 = 85;

/// Validate an uploaded file name and return its lowercase extension.
///
/// Runs before any decode attempt so disallowed types never reach the decoder.
pub fn validate_upload_name(filename: &str) -> Result<String, CoreError> {
    if filename.is_empty() {
        return Err(CoreError::Validation("No file selected".into()));
    }
    let ext = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    };
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "File type not allowed. Supported: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )))
    }
}

/// Generate a collision-free storage name that keeps the original extension.
pub fn storage_filename(ext: &str) -> String {
    format!("{}.{ext}", uuid::Uuid::new_v4())
}

/// Whether `name` can be joined onto the upload directory without escaping it.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
}

/// Dimensions that fit `(width, height)` inside `(max_width, max_height)`
/// while keeping the aspect ratio. Never grows an image.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || (width <= max_width && height <= max_height) {
        return (width, height);
    }
    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );
    let fitted_w = ((f64::from(width) * scale).round() as u32).clamp(1, max_width);
    let fitted_h = ((f64::from(height) * scale).round() as u32).clamp(1, max_height);
    (fitted_w, fitted_h)
}

/// Decode an uploaded image, shrink it into the bounding box, drop any alpha
/// or palette, and re-encode it as JPEG.
///
/// CPU-bound: callers on an async runtime should run this on a blocking thread.
pub fn transcode_to_jpeg(data: &[u8]) -> Result<Vec<u8>, CoreError> {
    let decoded = image::load_from_memory(data)
        .map_err(|e| CoreError::Validation(format!("Could not decode image: {e}")))?;

    let (width, height) = (decoded.width(), decoded.height());
    let (target_w, target_h) = fit_within(width, height, MAX_WIDTH, MAX_HEIGHT);
    let resized = if (target_w, target_h) == (width, height) {
        decoded
    } else {
        decoded.resize_exact(target_w, target_h, FilterType::Lanczos3)
    };

    let rgb = resized.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| CoreError::Internal(format!("JPEG encoding failed: {e}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    fn translucent_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 128]));
        encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(validate_upload_name("Fachada.JPG").unwrap(), "jpg");
        assert_eq!(validate_upload_name("a.b.WebP").unwrap(), "webp");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_matches!(validate_upload_name(""), Err(CoreError::Validation(msg)) if msg.contains("No file"));
    }

    #[test]
    fn disallowed_or_missing_extension_is_rejected() {
        assert!(validate_upload_name("menu.pdf").is_err());
        assert!(validate_upload_name("noextension").is_err());
        assert!(validate_upload_name("trailingdot.").is_err());
    }

    #[test]
    fn storage_names_are_unique_and_keep_extension() {
        let a = storage_filename("png");
        let b = storage_filename("png");
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
        assert!(is_safe_filename(&a));
    }

    #[test]
    fn unsafe_names() {
        assert!(!is_safe_filename("../etc/passwd"));
        assert!(!is_safe_filename("a/b.jpg"));
        assert!(!is_safe_filename(".."));
        assert!(!is_safe_filename(""));
    }

    #[test]
    fn fit_keeps_small_images() {
        assert_eq!(fit_within(640, 480, 1200, 800), (640, 480));
        assert_eq!(fit_within(1200, 800, 1200, 800), (1200, 800));
    }

    #[test]
    fn fit_shrinks_landscape_by_width() {
        assert_eq!(fit_within(3000, 2000, 1200, 800), (1200, 800));
        assert_eq!(fit_within(2400, 1000, 1200, 800), (1200, 500));
    }

    #[test]
    fn fit_shrinks_portrait_by_height() {
        assert_eq!(fit_within(1000, 2000, 1200, 800), (400, 800));
    }

    #[test]
    fn fit_never_collapses_to_zero() {
        assert_eq!(fit_within(10_000, 1, 1200, 800), (1200, 1));
    }

    #[test]
    fn transcode_shrinks_and_outputs_jpeg() {
        let out = transcode_to_jpeg(&translucent_png(1800, 1200)).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1200, 800));
    }

    #[test]
    fn transcode_does_not_upscale() {
        let out = transcode_to_jpeg(&translucent_png(300, 200)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 200));
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn corrupt_payload_is_a_validation_error() {
        assert_matches!(
            transcode_to_jpeg(b"definitely not an image"),
            Err(CoreError::Validation(_))
        );
    }
}
