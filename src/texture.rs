use std::io::Cursor;
use image::{ColorType, DynamicImage, ExtendedColorType, ImageEncoder};
use image::codecs::tga::TgaEncoder;
use image::imageops::FilterType;
use crate::error::{Error, Result};

pub const DEFAULT_MAX_SIZE: u32 = 512;

pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(Error::ImageDecode)
}

/// Flip `img` vertically, then shrink it to `max_size` x `max_size` if either side exceeds
/// `max_size`.  The result is always square after a resize, whatever the source aspect ratio.
pub fn normalize(img: DynamicImage, max_size: u32) -> DynamicImage {
    let img = img.flipv();
    if img.width().max(img.height()) > max_size {
        img.resize_exact(max_size, max_size, FilterType::Lanczos3)
    } else {
        img
    }
}

/// Encode as a run-length compressed TGA.  Grayscale sources stay grayscale (8-bit, or 16-bit
/// with alpha); color sources become 32-bit RGBA if they have alpha and 24-bit RGB otherwise.
pub fn encode_tga(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    let (w, h) = (img.width(), img.height());
    let enc = TgaEncoder::new(&mut out);
    let res = match img.color() {
        ColorType::L8 | ColorType::L16 =>
            enc.write_image(&img.to_luma8(), w, h, ExtendedColorType::L8),
        ColorType::La8 | ColorType::La16 =>
            enc.write_image(&img.to_luma_alpha8(), w, h, ExtendedColorType::La8),
        c if c.has_alpha() =>
            enc.write_image(&img.to_rgba8(), w, h, ExtendedColorType::Rgba8),
        _ =>
            enc.write_image(&img.to_rgb8(), w, h, ExtendedColorType::Rgb8),
    };
    res.map_err(Error::ImageEncode)?;
    Ok(out.into_inner())
}

/// Run the whole pipeline on the encoded bytes of one texture.
pub fn normalize_texture(bytes: &[u8], max_size: u32) -> Result<Vec<u8>> {
    let img = decode(bytes)?;
    let (w, h) = (img.width(), img.height());
    let img = normalize(img, max_size);
    log::debug!("texture {}x{} -> {}x{}", w, h, img.width(), img.height());
    encode_tga(&img)
}
