//! PNG encoding and data-URI wrapping

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, Rgb, RgbImage};
use tiny_skia::Pixmap;

use turtlekit_core::RenderError;

/// Serialize a finished pixmap as a self-contained `data:image/png;base64,`
/// URI string.
///
/// The canvas is fully opaque by construction (white background, everything
/// composited over it), so the premultiplied alpha channel can be dropped.
pub fn pixmap_to_data_uri(pixmap: &Pixmap) -> Result<String, RenderError> {
    let width = pixmap.width();
    let height = pixmap.height();
    let data = pixmap.data();

    let img = RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    });

    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| RenderError::Encode {
            reason: e.to_string(),
        })?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&bytes)))
}
