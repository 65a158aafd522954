//! Pixel colour heuristic
//!
//! Best-guess canonical key from raw RGBA pixels, with no network access.
//! Used only after every remote strategy was unavailable.
//!
//! # Buckets
//! Each predicate is evaluated independently per pixel and every one that
//! holds is incremented, so a pixel can land in several buckets (or none):
//! - **green:** G > R, G > B, G > 100 (organic / plant)
//! - **brown:** R > 100, G > 80, B < 80, |R-G| < 50 (organic / cardboard)
//! - **metallic:** |R-G| < 30, |G-B| < 30, R > 120 (grey / silver)
//! - **plastic:** any channel > 150 and max-min > 50 (bright / saturated)
//!
//! # Decision (first match wins)
//! 1. No bucket hits at all → bottle
//! 2. green or brown ratio > 0.3 → plant
//! 3. metallic ratio > 0.2 → can
//! 4. otherwise → bottle
//!
//! The plastic ratio is computed but does not take part in the decision.

use crate::catalog::CanonicalItemKey;
use crate::types::PixelBuffer;
use tracing::debug;

const ORGANIC_RATIO_THRESHOLD: f64 = 0.3;
const METALLIC_RATIO_THRESHOLD: f64 = 0.2;

/// Per-bucket pixel counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorBuckets {
    pub green: u64,
    pub brown: u64,
    pub metallic: u64,
    pub plastic: u64,
}

/// Bucket counts as fractions of the bucket total
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorRatios {
    pub green: f64,
    pub brown: f64,
    pub metallic: f64,
    pub plastic: f64,
}

impl ColorBuckets {
    /// Sum of all bucket counts (a multi-bucket pixel counts more than once)
    pub fn total(&self) -> u64 {
        self.green + self.brown + self.metallic + self.plastic
    }

    /// Bucket ratios; `None` when no pixel hit any bucket
    pub fn ratios(&self) -> Option<ColorRatios> {
        let total = self.total();
        if total == 0 {
            return None;
        }

        let total = total as f64;
        Some(ColorRatios {
            green: self.green as f64 / total,
            brown: self.brown as f64 / total,
            metallic: self.metallic as f64 / total,
            plastic: self.plastic as f64 / total,
        })
    }

    fn add_pixel(&mut self, r: u8, g: u8, b: u8) {
        let (r, g, b) = (r as i32, g as i32, b as i32);

        if g > r && g > b && g > 100 {
            self.green += 1;
        }

        if r > 100 && g > 80 && b < 80 && (r - g).abs() < 50 {
            self.brown += 1;
        }

        if (r - g).abs() < 30 && (g - b).abs() < 30 && r > 120 {
            self.metallic += 1;
        }

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        if (r > 150 || g > 150 || b > 150) && max - min > 50 {
            self.plastic += 1;
        }
    }
}

/// Count bucket hits over a packed RGBA buffer
///
/// Alpha is ignored. Trailing bytes that do not form a whole pixel are
/// skipped.
pub fn count_buckets(rgba: &[u8]) -> ColorBuckets {
    let mut buckets = ColorBuckets::default();
    for px in rgba.chunks_exact(4) {
        buckets.add_pixel(px[0], px[1], px[2]);
    }
    buckets
}

/// Map bucket counts to a canonical key
pub fn decide(buckets: &ColorBuckets) -> CanonicalItemKey {
    let Some(ratios) = buckets.ratios() else {
        return CanonicalItemKey::Bottle;
    };

    if ratios.green > ORGANIC_RATIO_THRESHOLD || ratios.brown > ORGANIC_RATIO_THRESHOLD {
        CanonicalItemKey::Plant
    } else if ratios.metallic > METALLIC_RATIO_THRESHOLD {
        CanonicalItemKey::Can
    } else {
        CanonicalItemKey::Bottle
    }
}

/// Analyze `width * height` pixels of `rgba` and return a best-guess key
///
/// Bytes past `width * height * 4` are ignored. Cannot fail.
pub fn analyze(rgba: &[u8], width: u32, height: u32) -> CanonicalItemKey {
    let len = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
        .min(rgba.len());
    let buckets = count_buckets(&rgba[..len]);
    let key = decide(&buckets);

    debug!(
        width = width,
        height = height,
        green = buckets.green,
        brown = buckets.brown,
        metallic = buckets.metallic,
        plastic = buckets.plastic,
        key = %key,
        "Colour heuristic analysis complete"
    );

    key
}

/// Analyze a decoded pixel buffer
pub fn analyze_buffer(buffer: &PixelBuffer) -> CanonicalItemKey {
    analyze(&buffer.rgba, buffer.width, buffer.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: [u8; 4] = [50, 140, 50, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const GREY: [u8; 4] = [180, 180, 180, 255];
    const BROWN: [u8; 4] = [150, 110, 50, 255];
    const RED: [u8; 4] = [200, 30, 30, 255];

    fn image_of(pixels: &[([u8; 4], usize)]) -> Vec<u8> {
        pixels
            .iter()
            .flat_map(|(px, n)| std::iter::repeat(*px).take(*n))
            .flatten()
            .collect()
    }

    #[test]
    fn test_green_only_pixel_hits_one_bucket() {
        let buckets = count_buckets(&GREEN);
        assert_eq!(
            buckets,
            ColorBuckets {
                green: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_pixel_can_hit_several_buckets() {
        // Bright green: green and plastic both hold
        let buckets = count_buckets(&[60, 200, 60, 255]);
        assert_eq!(buckets.green, 1);
        assert_eq!(buckets.plastic, 1);
        assert_eq!(buckets.total(), 2);
    }

    #[test]
    fn test_mostly_green_image_is_plant() {
        // 10x10: 80 green pixels, 20 black
        let rgba = image_of(&[(GREEN, 80), (BLACK, 20)]);
        assert_eq!(analyze(&rgba, 10, 10), CanonicalItemKey::Plant);
    }

    #[test]
    fn test_all_black_image_defaults_to_bottle() {
        let rgba = image_of(&[(BLACK, 100)]);
        assert_eq!(count_buckets(&rgba).total(), 0);
        assert_eq!(analyze(&rgba, 10, 10), CanonicalItemKey::Bottle);
    }

    #[test]
    fn test_brown_image_is_plant() {
        let rgba = image_of(&[(BROWN, 10)]);
        assert_eq!(analyze(&rgba, 10, 1), CanonicalItemKey::Plant);
    }

    #[test]
    fn test_grey_image_is_can() {
        let rgba = image_of(&[(GREY, 25)]);
        assert_eq!(analyze(&rgba, 5, 5), CanonicalItemKey::Can);
    }

    #[test]
    fn test_plastic_ratio_is_not_consulted() {
        let rgba = image_of(&[(RED, 16)]);
        let buckets = count_buckets(&rgba);
        assert_eq!(buckets.plastic, 16);
        assert_eq!(buckets.ratios().unwrap().plastic, 1.0);
        assert_eq!(decide(&buckets), CanonicalItemKey::Bottle);
    }

    #[test]
    fn test_metallic_ratio_must_exceed_threshold() {
        // 1 of 5 bucket hits metallic: exactly 0.2, not above it
        let at_threshold = ColorBuckets {
            metallic: 1,
            plastic: 4,
            ..Default::default()
        };
        assert_eq!(decide(&at_threshold), CanonicalItemKey::Bottle);

        let above = ColorBuckets {
            metallic: 2,
            plastic: 4,
            ..Default::default()
        };
        assert_eq!(decide(&above), CanonicalItemKey::Can);
    }

    #[test]
    fn test_organic_check_precedes_metallic() {
        let buckets = ColorBuckets {
            green: 4,
            metallic: 6,
            ..Default::default()
        };
        assert_eq!(decide(&buckets), CanonicalItemKey::Plant);
    }

    #[test]
    fn test_bytes_beyond_dimensions_are_ignored() {
        // Declared 2x1 (black), followed by grey pixels outside the image
        let rgba = image_of(&[(BLACK, 2), (GREY, 10)]);
        assert_eq!(analyze(&rgba, 2, 1), CanonicalItemKey::Bottle);
    }

    #[test]
    fn test_partial_trailing_pixel_is_skipped() {
        let mut rgba = GREY.to_vec();
        rgba.extend_from_slice(&[0, 255, 0]);
        assert_eq!(count_buckets(&rgba).total(), 1);
    }

    #[test]
    fn test_analyze_buffer() {
        let buffer = PixelBuffer {
            width: 2,
            height: 2,
            rgba: image_of(&[(GREY, 4)]),
        };
        assert_eq!(analyze_buffer(&buffer), CanonicalItemKey::Can);
    }
}
