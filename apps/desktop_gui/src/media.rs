//! Image decoding for previews and clipboard export.

use arboard::{Clipboard, ImageData};

/// Upload previews are small; the result image is also shown fullscreen.
pub const UPLOAD_PREVIEW_MAX_DIMENSION: u32 = 512;
pub const RESULT_PREVIEW_MAX_DIMENSION: u32 = 2048;

#[derive(Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl PreviewImage {
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied([self.width, self.height], &self.rgba)
    }
}

pub fn decode_preview_image(bytes: &[u8], max_dimension: u32) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let fitted = if dynamic.width() > max_dimension || dynamic.height() > max_dimension {
        dynamic.thumbnail(max_dimension, max_dimension)
    } else {
        dynamic
    };
    let resized = fitted.to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

fn decode_image_for_clipboard(bytes: &[u8]) -> Result<(Vec<u8>, usize, usize), String> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|err| err.to_string())?
        .to_rgba8();
    let width = rgba.width() as usize;
    let height = rgba.height() as usize;
    Ok((rgba.into_raw(), width, height))
}

pub fn copy_image_to_clipboard(bytes: &[u8]) -> Result<(), String> {
    let (rgba, width, height) = decode_image_for_clipboard(bytes)?;
    let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
    clipboard
        .set_image(ImageData {
            width,
            height,
            bytes: std::borrow::Cow::Owned(rgba),
        })
        .map_err(|err| err.to_string())
}

/// Largest size with the image's aspect ratio that fits in `available`,
/// never upscaling past the native size unless `allow_upscale` is set.
pub fn fit_size(image: egui::Vec2, available: egui::Vec2, allow_upscale: bool) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let mut scale = (available.x / image.x).min(available.y / image.y);
    if !allow_upscale {
        scale = scale.min(1.0);
    }
    image * scale.max(0.0)
}
