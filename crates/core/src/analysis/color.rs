//! Coarse dominant-color extraction.
//!
//! The image is resampled to a fixed 100x100 grid (cover-fit) and each RGB
//! channel is bucketed to the nearest multiple of 32, which collapses the
//! color space enough that a frequency tally yields a usable palette.

use std::collections::HashMap;

use image::imageops::FilterType;
use image::DynamicImage;

/// Side length of the resampled grid the tally runs over.
const SAMPLE_SIZE: u32 = 100;

/// Channel bucket width.
const BUCKET_STEP: u32 = 32;

/// Maximum number of palette entries returned.
const PALETTE_LEN: usize = 5;

/// Extract up to five `#rrggbb` palette entries ordered by descending
/// frequency. The first entry is the dominant color. Ties keep
/// first-encountered order (the sort is stable on count only).
pub fn extract_palette(img: &DynamicImage) -> Vec<String> {
    let thumb = img
        .resize_to_fill(SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Triangle)
        .to_rgb8();

    let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
    let mut order: Vec<[u8; 3]> = Vec::new();

    for pixel in thumb.pixels() {
        let key = [bucket(pixel[0]), bucket(pixel[1]), bucket(pixel[2])];
        let count = counts.entry(key).or_insert_with(|| {
            order.push(key);
            0
        });
        *count += 1;
    }

    let mut keys = order;
    keys.sort_by(|a, b| counts[b].cmp(&counts[a]));
    keys.truncate(PALETTE_LEN);

    keys.iter()
        .map(|[r, g, b]| format!("#{r:02x}{g:02x}{b:02x}"))
        .collect()
}

/// Round a channel value to the nearest multiple of 32, clamped to 255.
fn bucket(value: u8) -> u8 {
    (((u32::from(value) + BUCKET_STEP / 2) / BUCKET_STEP) * BUCKET_STEP).min(255) as u8
}
