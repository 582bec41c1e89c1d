//! Image download and decode for guess thumbnails and metadata pictures.

use reqwest::Client as HttpClient;

const MAX_PREVIEW_DIMENSION: u32 = 1024;

/// Decoded RGBA pixels ready to upload as an egui texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let oversized =
        dynamic.width() > MAX_PREVIEW_DIMENSION || dynamic.height() > MAX_PREVIEW_DIMENSION;
    let resized = if oversized {
        dynamic.thumbnail(MAX_PREVIEW_DIMENSION, MAX_PREVIEW_DIMENSION)
    } else {
        dynamic
    }
    .to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

pub async fn fetch_preview_image(http: &HttpClient, url: &str) -> Result<PreviewImage, String> {
    let response = http
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|err| format!("failed to download image: {err}"))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|err| format!("failed to read image body: {err}"))?;
    decode_preview_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .expect("encode png");
        out
    }

    #[test]
    fn decodes_small_png_unchanged() {
        let image = decode_preview_image(&png(4, 2)).expect("decode");
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(image.rgba.len(), 4 * 2 * 4);
        assert_eq!(&image.rgba[..4], &[200, 10, 10, 255]);
    }

    #[test]
    fn large_images_are_shrunk_to_preview_bounds() {
        let image = decode_preview_image(&png(2048, 512)).expect("decode");
        assert_eq!(image.width, 1024);
        assert_eq!(image.height, 256);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(decode_preview_image(b"<html>not an image</html>").is_err());
    }
}
