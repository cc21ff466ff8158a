use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// How the filename heuristic arrived at a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GuessSource {
    /// A resolution keyword such as "1080p" or "4k" matched.
    Keyword { label: &'static str },
    /// An explicit `WxH` pair was found in the name.
    ExplicitDimensions,
    /// Nothing matched; the default resolution was used.
    Default,
}

/// Resolution guessed from a filename. Never derived from the media itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolutionGuess {
    pub width: u32,
    pub height: u32,
    pub source: GuessSource,
}

impl ResolutionGuess {
    pub const DEFAULT_WIDTH: u32 = 1280;
    pub const DEFAULT_HEIGHT: u32 = 720;

    /// The 1280x720 default, also used as the handler's fallback.
    pub const fn fallback() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            source: GuessSource::Default,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self.source, GuessSource::Default)
    }
}

impl Display for ResolutionGuess {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Coarse quality classification derived from frame height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProfileTier {
    #[serde(rename = "SD")]
    Sd,
    #[serde(rename = "HD")]
    Hd,
    #[serde(rename = "Full HD")]
    FullHd,
    #[serde(rename = "UHD")]
    Uhd,
}

impl ProfileTier {
    pub fn for_height(height: u32) -> Self {
        match height {
            2160.. => ProfileTier::Uhd,
            1080.. => ProfileTier::FullHd,
            720.. => ProfileTier::Hd,
            _ => ProfileTier::Sd,
        }
    }

    /// Placeholder video bitrate for the tier.
    pub fn video_bitrate_bps(&self) -> u64 {
        match self {
            ProfileTier::Uhd => 25_000_000,
            ProfileTier::FullHd => 8_000_000,
            ProfileTier::Hd => 5_000_000,
            ProfileTier::Sd => 2_500_000,
        }
    }

    /// H.264 level that fits the tier at 30 fps.
    pub fn h264_level(&self) -> &'static str {
        match self {
            ProfileTier::Uhd => "5.1",
            ProfileTier::FullHd => "4.1",
            ProfileTier::Hd => "3.1",
            ProfileTier::Sd => "3.0",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileTier::Sd => "SD",
            ProfileTier::Hd => "HD",
            ProfileTier::FullHd => "Full HD",
            ProfileTier::Uhd => "UHD",
        }
    }
}

impl Display for ProfileTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Rung of the encoding ladder chosen for a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EncodeTier {
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "2160p")]
    P2160,
}

impl EncodeTier {
    /// Minimum source (width, height) for the tier.
    pub fn min_dimensions(&self) -> (u32, u32) {
        match self {
            EncodeTier::P2160 => (3840, 2160),
            EncodeTier::P1080 => (1920, 1080),
            EncodeTier::P720 => (1280, 720),
        }
    }

    /// Event field holding the job template name for this tier.
    pub fn template_field(&self) -> &'static str {
        match self {
            EncodeTier::P2160 => "jobTemplate_2160p",
            EncodeTier::P1080 => "jobTemplate_1080p",
            EncodeTier::P720 => "jobTemplate_720p",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EncodeTier::P2160 => "2160p",
            EncodeTier::P1080 => "1080p",
            EncodeTier::P720 => "720p",
        }
    }
}

impl Display for EncodeTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_tier_thresholds() {
        assert_eq!(ProfileTier::for_height(4320), ProfileTier::Uhd);
        assert_eq!(ProfileTier::for_height(2160), ProfileTier::Uhd);
        assert_eq!(ProfileTier::for_height(2159), ProfileTier::FullHd);
        assert_eq!(ProfileTier::for_height(1440), ProfileTier::FullHd);
        assert_eq!(ProfileTier::for_height(1080), ProfileTier::FullHd);
        assert_eq!(ProfileTier::for_height(900), ProfileTier::Hd);
        assert_eq!(ProfileTier::for_height(720), ProfileTier::Hd);
        assert_eq!(ProfileTier::for_height(719), ProfileTier::Sd);
        assert_eq!(ProfileTier::for_height(0), ProfileTier::Sd);
    }

    #[test]
    fn test_profile_tier_serializes_display_name() {
        assert_eq!(
            serde_json::to_string(&ProfileTier::FullHd).unwrap(),
            "\"Full HD\""
        );
        assert_eq!(ProfileTier::Uhd.to_string(), "UHD");
        let tier: ProfileTier = serde_json::from_str("\"SD\"").unwrap();
        assert_eq!(tier, ProfileTier::Sd);
    }

    #[test]
    fn test_guess_source_serialization() {
        let guess = ResolutionGuess {
            width: 1920,
            height: 1080,
            source: GuessSource::Keyword { label: "1080p" },
        };
        let value = serde_json::to_value(guess).unwrap();
        assert_eq!(value["source"]["kind"], "keyword");
        assert_eq!(value["source"]["label"], "1080p");
        assert_eq!(guess.to_string(), "1920x1080");

        let fallback = serde_json::to_value(ResolutionGuess::fallback()).unwrap();
        assert_eq!(fallback["source"]["kind"], "default");
        assert!(ResolutionGuess::fallback().is_default());
    }

    #[test]
    fn test_encode_tier_ordering_and_fields() {
        assert!(EncodeTier::P2160 > EncodeTier::P1080);
        assert!(EncodeTier::P1080 > EncodeTier::P720);
        assert_eq!(EncodeTier::P1080.template_field(), "jobTemplate_1080p");
        assert_eq!(EncodeTier::P720.min_dimensions(), (1280, 720));
    }
}
