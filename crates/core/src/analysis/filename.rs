//! Filename keyword matcher.
//!
//! Guesses what a photo shows from substrings of its original filename.
//! A filename may match several groups at once; matched keywords are
//! unioned. Also detects an embedded shooting date.

use std::sync::LazyLock;

use regex::Regex;

/// Result of scanning a filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameAnalysis {
    /// Topic keywords inferred from the filename (possibly empty).
    pub keywords: Vec<String>,
    /// First date-like substring found (`YYYY-MM-DD`, `YYYY_MM_DD`, or a
    /// bare 8-digit run), if any.
    pub date_pattern: Option<String>,
}

/// Substring groups and the keywords each group contributes.
const KEYWORD_GROUPS: &[(&[&str], &[&str])] = &[
    (
        &[
            "landscape", "scenery", "view", "mountain", "sea", "ocean", "beach", "sunset",
            "sunrise", "sky", "cloud",
        ],
        &["landscape", "nature"],
    ),
    (
        &["portrait", "person", "people", "family", "friend", "selfie", "face"],
        &["portrait", "people"],
    ),
    (
        &["food", "meal", "lunch", "dinner", "breakfast", "restaurant", "cafe", "drink"],
        &["food"],
    ),
    (&["pet", "dog", "cat", "animal", "bird", "fish"], &["animal", "pet"]),
    (
        &["building", "house", "architecture", "city", "street", "bridge"],
        &["architecture", "building"],
    ),
    (
        &["car", "train", "plane", "bike", "vehicle", "travel"],
        &["vehicle", "travel"],
    ),
];

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}[-_]\d{2}[-_]\d{2}|\d{8}").expect("date pattern regex is valid")
});

/// Scan a filename for topic keywords and a date-like substring.
///
/// Never fails; multi-byte filenames are fine. Matching is done on the
/// lowercased filename.
pub fn analyze_filename(filename: &str) -> FilenameAnalysis {
    let name = filename.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();

    for (patterns, group_keywords) in KEYWORD_GROUPS {
        if patterns.iter().any(|p| name.contains(p)) {
            for kw in *group_keywords {
                let kw = kw.to_string();
                if !keywords.contains(&kw) {
                    keywords.push(kw);
                }
            }
        }
    }

    let date_pattern = DATE_PATTERN.find(&name).map(|m| m.as_str().to_string());

    FilenameAnalysis {
        keywords,
        date_pattern,
    }
}
