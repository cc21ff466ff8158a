//! Best-effort filename heuristic for source resolution.
//!
//! Guesses a frame size from resolution keywords ("1080p", "4k", ...) or an
//! explicit `WxH` pair in the filename. This is not media inspection: the file
//! is never opened, and a misleading name yields a misleading guess.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::MediaInfoError;
use crate::models::{GuessSource, ResolutionGuess, SOURCE_VIDEO_FIELD};

struct KeywordRule {
    keywords: &'static [&'static str],
    width: u32,
    height: u32,
}

/// Checked in order; first match wins. "hd" and "sd" are substrings of longer
/// keywords, so the order matters.
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["4k", "2160p", "uhd"],
        width: 3840,
        height: 2160,
    },
    KeywordRule {
        keywords: &["1440p", "2k"],
        width: 2560,
        height: 1440,
    },
    KeywordRule {
        keywords: &["1080p", "fhd", "fullhd"],
        width: 1920,
        height: 1080,
    },
    KeywordRule {
        keywords: &["720p", "hd"],
        width: 1280,
        height: 720,
    },
    KeywordRule {
        keywords: &["480p", "sd"],
        width: 854,
        height: 480,
    },
    KeywordRule {
        keywords: &["360p"],
        width: 640,
        height: 360,
    },
];

static KEYWORD_PATTERNS: LazyLock<Vec<(Regex, &'static KeywordRule)>> = LazyLock::new(|| {
    KEYWORD_RULES
        .iter()
        .map(|rule| {
            let alternatives: Vec<String> =
                rule.keywords.iter().map(|k| regex::escape(k)).collect();
            let pattern = format!("(?i){}", alternatives.join("|"));
            let regex = Regex::new(&pattern).expect("resolution keyword pattern is valid");
            (regex, rule)
        })
        .collect()
});

/// 3-4 digit width, "x", 3-4 digit height, not part of a longer digit run.
static DIMENSIONS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^0-9])([0-9]{3,4})x([0-9]{3,4})(?:[^0-9]|$)")
        .expect("dimensions pattern is valid")
});

/// Guess the resolution of the video named by `filename`.
///
/// Fails only when the filename is empty or blank. Otherwise always returns a
/// positive width and height, defaulting to 1280x720.
pub fn infer(filename: &str) -> Result<ResolutionGuess, MediaInfoError> {
    if filename.trim().is_empty() {
        return Err(MediaInfoError::MissingField(SOURCE_VIDEO_FIELD));
    }

    if let Some(guess) = match_keyword(filename) {
        return Ok(guess);
    }

    if let Some(guess) = match_dimensions(filename) {
        return Ok(guess);
    }

    tracing::debug!(filename, "No resolution hint in filename, using default");
    Ok(ResolutionGuess::fallback())
}

fn match_keyword(filename: &str) -> Option<ResolutionGuess> {
    KEYWORD_PATTERNS.iter().find_map(|(regex, rule)| {
        let found = regex.find(filename)?;
        let label = rule
            .keywords
            .iter()
            .copied()
            .find(|k| k.eq_ignore_ascii_case(found.as_str()))
            .unwrap_or(rule.keywords[0]);
        Some(ResolutionGuess {
            width: rule.width,
            height: rule.height,
            source: GuessSource::Keyword { label },
        })
    })
}

fn match_dimensions(filename: &str) -> Option<ResolutionGuess> {
    DIMENSIONS_PATTERN.captures_iter(filename).find_map(|caps| {
        let width: u32 = caps.get(1)?.as_str().parse().ok()?;
        let height: u32 = caps.get(2)?.as_str().parse().ok()?;
        (width > 0 && height > 0).then_some(ResolutionGuess {
            width,
            height,
            source: GuessSource::ExplicitDimensions,
        })
    })
}

/// Final path component of an object key or local path.
///
/// Trailing separators are ignored, so "uploads/1080p/" names "1080p". Empty
/// only when the path holds nothing but separators.
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed)
}
