//! Test Image Generator
//!
//! Encodes small in-memory images for classification tests

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Mid green that lands only in the green bucket
pub const LEAF_GREEN: [u8; 4] = [50, 140, 50, 255];

/// Neutral grey that lands only in the metallic bucket
pub const STEEL_GREY: [u8; 4] = [180, 180, 180, 255];

pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Encode a solid-colour PNG
pub fn solid_png(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(pixel));
    encode(&img, ImageFormat::Png)
}

/// Encode a 10x10 PNG whose first `colored` pixels are `pixel`, rest black
pub fn mixed_png(pixel: [u8; 4], colored: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(10, 10, |x, y| {
        if y * 10 + x < colored {
            Rgba(pixel)
        } else {
            Rgba(BLACK)
        }
    });
    encode(&img, ImageFormat::Png)
}

/// Encode a solid-colour JPEG
pub fn solid_jpeg(width: u32, height: u32, pixel: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(pixel));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Jpeg)
        .expect("encode jpeg");
    out.into_inner()
}

fn encode(img: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).expect("encode image");
    out.into_inner()
}
