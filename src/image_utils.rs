//! Letterhead image handling
//!
//! Letterheads are raster images (PNG or JPEG) stretched over the full page
//! behind the letter content. JPEG data is embedded as-is with a DCTDecode
//! filter; other formats are decoded and embedded as raw samples, with the
//! alpha channel split off into an SMask.

use image::io::Reader as ImageReader;
use image::{DynamicImage, GenericImageView};
use jpeg_decoder::PixelFormat;
use log::debug;
use pdf_writer::{Filter, Name, Pdf, Ref};
use std::io::Cursor;
use std::path::Path;

use crate::error::{RenderError, RenderResult};

/// Decoded (or passthrough) letterhead image ready for embedding
pub enum LetterheadImage {
    /// Raw JPEG bytes with their RGB dimensions, embedded via DCTDecode
    Jpeg { data: Vec<u8>, width: u32, height: u32 },
    /// Anything else, decoded to pixels
    Raster(DynamicImage),
}

impl LetterheadImage {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            LetterheadImage::Jpeg { width, height, .. } => (*width, *height),
            LetterheadImage::Raster(img) => img.dimensions(),
        }
    }
}

/// Load a letterhead image from a file path
pub fn load_letterhead(path: &str) -> RenderResult<LetterheadImage> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        return Err(RenderError::ImageError(format!(
            "Letterhead file not found: {}",
            path
        )));
    }
    let data = std::fs::read(path_obj)?;
    load_letterhead_bytes(data)
}

/// Load a letterhead image from raw bytes
pub fn load_letterhead_bytes(data: Vec<u8>) -> RenderResult<LetterheadImage> {
    if data.len() > 2 && data[0] == 0xFF && data[1] == 0xD8 {
        // JPEG: read the header only and keep the compressed stream
        let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(&data));
        decoder
            .read_info()
            .map_err(|e| RenderError::ImageError(format!("Failed to read JPEG header: {}", e)))?;
        let info = decoder
            .info()
            .ok_or_else(|| RenderError::ImageError("JPEG header missing info".to_string()))?;

        // Only baseline RGB goes through untouched; other pixel formats are
        // decoded and re-embedded as raw samples.
        if info.pixel_format == PixelFormat::RGB24 {
            return Ok(LetterheadImage::Jpeg {
                width: info.width as u32,
                height: info.height as u32,
                data,
            });
        }
    }

    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| RenderError::ImageError(format!("Failed to read image format: {}", e)))?
        .decode()
        .map_err(|e| RenderError::ImageError(format!("Failed to decode image: {}", e)))?;

    Ok(LetterheadImage::Raster(img))
}

/// Add the letterhead to the PDF as an image XObject and return its
/// resource name.
pub fn add_letterhead_to_pdf(
    pdf: &mut Pdf,
    letterhead: &LetterheadImage,
    image_id: Ref,
    next_ref_id: &mut i32,
) -> RenderResult<Name<'static>> {
    match letterhead {
        LetterheadImage::Jpeg { data, width, height } => {
            let mut xobject = pdf.image_xobject(image_id, data);
            xobject.filter(Filter::DctDecode);
            xobject.width(*width as i32);
            xobject.height(*height as i32);
            xobject.color_space().device_rgb();
            xobject.bits_per_component(8);
            debug!("letterhead: JPEG passthrough {}x{}", width, height);
        }
        LetterheadImage::Raster(img) => {
            let has_alpha = img.color().has_alpha();

            let (rgb, width, height, alpha) = if has_alpha {
                let rgba = img.to_rgba8();
                let (w, h) = rgba.dimensions();
                let bytes = rgba.into_raw();
                let mut rgb = Vec::with_capacity((w * h * 3) as usize);
                let mut alpha = Vec::with_capacity((w * h) as usize);
                for chunk in bytes.chunks_exact(4) {
                    rgb.push(chunk[0]);
                    rgb.push(chunk[1]);
                    rgb.push(chunk[2]);
                    alpha.push(chunk[3]);
                }
                (rgb, w, h, Some(alpha))
            } else {
                let rgb = img.to_rgb8();
                let (w, h) = rgb.dimensions();
                (rgb.into_raw(), w, h, None)
            };

            let smask_id = alpha.map(|alpha_data| {
                let smask_id = Ref::new(*next_ref_id);
                *next_ref_id += 1;
                let mut smask = pdf.image_xobject(smask_id, &alpha_data);
                smask.width(width as i32);
                smask.height(height as i32);
                smask.color_space().device_gray();
                smask.bits_per_component(8);
                smask_id
            });

            let mut xobject = pdf.image_xobject(image_id, &rgb);
            xobject.width(width as i32);
            xobject.height(height as i32);
            xobject.color_space().device_rgb();
            xobject.bits_per_component(8);
            if let Some(smask_id) = smask_id {
                xobject.s_mask(smask_id);
            }
            debug!(
                "letterhead: raster {}x{}, smask={}",
                width,
                height,
                smask_id.is_some()
            );
        }
    }

    Ok(Name(b"I1"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_letterhead() {
        assert!(matches!(
            load_letterhead("/nonexistent/head.png"),
            Err(RenderError::ImageError(_))
        ));
    }

    #[test]
    fn test_png_roundtrip_to_raster() {
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageOutputFormat::Png)
            .unwrap();

        let letterhead = load_letterhead_bytes(buf).unwrap();
        assert!(matches!(letterhead, LetterheadImage::Raster(_)));
        assert_eq!(letterhead.dimensions(), (4, 2));
    }

    #[test]
    fn test_gray_alpha_gets_smask() {
        let buf = image::ImageBuffer::from_pixel(2, 2, image::LumaA([20000u16, 30000u16]));
        let letterhead = LetterheadImage::Raster(DynamicImage::ImageLumaA16(buf));

        let mut pdf = Pdf::new();
        let mut next_ref = 2;
        add_letterhead_to_pdf(&mut pdf, &letterhead, Ref::new(1), &mut next_ref).unwrap();

        // The alpha channel must come through as a soft mask object
        assert_eq!(next_ref, 3);
        let s = String::from_utf8_lossy(&pdf.finish()).into_owned();
        assert!(s.contains("/SMask"));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        assert!(load_letterhead_bytes(vec![0x00, 0x01, 0x02, 0x03]).is_err());
    }
}
