//! Best-effort image categorization.
//!
//! Combines filename keywords, aspect ratio, resolution, and a coarse
//! dominant-color tally into a category guess with a confidence score and a
//! set of suggested display tags. The guess is explicitly allowed to be
//! wrong; callers use it to prefill tags, nothing more.
//!
//! The function never fails: an undecodable buffer (or an image reporting a
//! zero dimension) produces [`AnalysisOutcome::Degraded`] with a fixed
//! fallback payload, so ingestion can proceed with the media unanalyzed.

pub mod color;
pub mod filename;

use filename::FilenameAnalysis;

pub const CATEGORY_LANDSCAPE: &str = "landscape";
pub const CATEGORY_PORTRAIT: &str = "portrait";
pub const CATEGORY_FOOD: &str = "food";
pub const CATEGORY_ANIMAL: &str = "animal";
pub const CATEGORY_ARCHITECTURE: &str = "architecture";
pub const CATEGORY_VEHICLE: &str = "vehicle";
pub const CATEGORY_OTHER: &str = "other";

/// Pixel count above which an otherwise unclassified image is assumed to be
/// a landscape shot (8 MP).
const HIGH_RES_PIXELS: u64 = 8_000_000;

/// Japanese display labels attached per category.
const CATEGORY_LABELS: &[(&str, &[&str])] = &[
    (CATEGORY_LANDSCAPE, &["風景", "景色", "自然"]),
    (CATEGORY_PORTRAIT, &["人物", "ポートレート"]),
    (CATEGORY_FOOD, &["食べ物", "料理", "グルメ"]),
    (CATEGORY_ANIMAL, &["動物", "ペット"]),
    (CATEGORY_ARCHITECTURE, &["建築", "建物", "街並み"]),
    (CATEGORY_VEHICLE, &["乗り物", "交通", "旅行"]),
];

/// Color-name labels for exactly eight primary/secondary palette values.
/// Any other dominant color contributes no label.
const COLOR_NAMES: &[(&str, &str)] = &[
    ("#ff0000", "赤"),
    ("#00ff00", "緑"),
    ("#0000ff", "青"),
    ("#ffff00", "黄色"),
    ("#ff00ff", "紫"),
    ("#00ffff", "水色"),
    ("#ffffff", "白"),
    ("#000000", "黒"),
];

/// Result payload of the categorization heuristic.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ImageAnalysis {
    pub category: String,
    /// Confidence in `category`, 0.0..=1.0.
    pub confidence: f64,
    pub suggested_tags: Vec<String>,
    /// Up to five `#rrggbb` palette entries, dominant first.
    pub colors: Vec<String>,
    pub width: u32,
    pub height: u32,
}

impl ImageAnalysis {
    /// The fixed payload returned when the image cannot be analyzed.
    pub fn fallback() -> Self {
        Self {
            category: CATEGORY_OTHER.to_string(),
            confidence: 0.1,
            suggested_tags: Vec::new(),
            colors: Vec::new(),
            width: 0,
            height: 0,
        }
    }
}

/// Outcome of [`analyze_image`], making the always-succeeds contract
/// explicit in the type: callers match instead of catching.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The image decoded and the payload carries real data.
    Analyzed(ImageAnalysis),
    /// Decode failed (or a dimension was zero); the payload is
    /// [`ImageAnalysis::fallback`]. The media should be persisted with
    /// `analyzed = false` and no inferred fields.
    Degraded(ImageAnalysis),
}

impl AnalysisOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    pub fn into_report(self) -> ImageAnalysis {
        match self {
            Self::Analyzed(report) | Self::Degraded(report) => report,
        }
    }
}

/// Categorize raw image bytes using their original filename as a hint.
///
/// Decode errors never escape; they degrade to the fallback payload.
pub fn analyze_image(bytes: &[u8], original_filename: &str) -> AnalysisOutcome {
    let img = match image::load_from_memory(bytes) {
        Ok(img) => img,
        Err(_) => return AnalysisOutcome::Degraded(ImageAnalysis::fallback()),
    };

    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        // An undefined aspect ratio is treated the same as a decode failure.
        return AnalysisOutcome::Degraded(ImageAnalysis::fallback());
    }
    let aspect_ratio = f64::from(width) / f64::from(height);

    let filename_analysis = filename::analyze_filename(original_filename);
    let colors = color::extract_palette(&img);

    let (category, confidence) =
        categorize(aspect_ratio, &filename_analysis.keywords, width, height);
    let suggested_tags = suggested_tags(&category, &colors, &filename_analysis);

    AnalysisOutcome::Analyzed(ImageAnalysis {
        category,
        confidence,
        suggested_tags,
        colors,
        width,
        height,
    })
}

/// Pick a category and confidence. Rules are evaluated in strict priority
/// order; the first that fires wins and later rules are never consulted.
fn categorize(aspect_ratio: f64, keywords: &[String], width: u32, height: u32) -> (String, f64) {
    let has = |kw: &str| keywords.iter().any(|k| k == kw);

    // Filename keywords: high confidence.
    if has("landscape") {
        return (CATEGORY_LANDSCAPE.to_string(), 0.9);
    }
    if has("portrait") || has("people") {
        return (CATEGORY_PORTRAIT.to_string(), 0.9);
    }
    if has("food") {
        return (CATEGORY_FOOD.to_string(), 0.9);
    }
    if has("animal") {
        return (CATEGORY_ANIMAL.to_string(), 0.9);
    }
    if has("architecture") {
        return (CATEGORY_ARCHITECTURE.to_string(), 0.9);
    }
    if has("vehicle") {
        return (CATEGORY_VEHICLE.to_string(), 0.9);
    }

    // Aspect ratio: medium confidence.
    if aspect_ratio > 1.5 {
        return (CATEGORY_LANDSCAPE.to_string(), 0.6);
    }
    if aspect_ratio < 0.8 {
        return (CATEGORY_PORTRAIT.to_string(), 0.6);
    }

    // Resolution: high pixel counts lean landscape.
    if u64::from(width) * u64::from(height) > HIGH_RES_PIXELS {
        return (CATEGORY_LANDSCAPE.to_string(), 0.4);
    }

    (CATEGORY_OTHER.to_string(), 0.2)
}

/// Build the suggested tag set: category display labels, then filename
/// keywords, then a color-name label for the dominant color (only for the
/// eight recognized values), then a literal "dated" marker. Deduplicated,
/// first occurrence kept.
fn suggested_tags(
    category: &str,
    colors: &[String],
    filename_analysis: &FilenameAnalysis,
) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: &str| {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    };

    if let Some((_, labels)) = CATEGORY_LABELS.iter().find(|(c, _)| *c == category) {
        for label in *labels {
            push(label);
        }
    }

    for keyword in &filename_analysis.keywords {
        push(keyword);
    }

    if let Some(dominant) = colors.first() {
        if let Some((_, name)) = COLOR_NAMES.iter().find(|(hex, _)| hex == dominant) {
            push(name);
        }
    }

    if filename_analysis.date_pattern.is_some() {
        push("dated");
    }

    tags
}
