//! Utility modules for ecosort-ai

pub mod http_client;
pub mod image_loader;

pub use http_client::build_http_client;
pub use image_loader::{
    check_inline_size, decode_pixels, ImageDecoder, ImageLoadError, RasterImageDecoder,
};
