//! Configuration for the hero section: content, layout and timing

use crate::ease::Ease;
use crate::error::{HeroError, Result};
use crate::layout::LayoutConfig;
use crate::stagger::{Stagger, StaggerFrom};
use crate::vocabulary::MarqueeVocabulary;
use directories::ProjectDirs;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Name of the configuration file looked up in the platform config dir
pub const CONFIG_FILE_NAME: &str = "hero.json";

/// Complete configuration of a hero section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Static copy rendered by the host
    pub content: HeroContent,

    /// Viewport to layout mapping
    pub layout: LayoutConfig,

    /// Durations, offsets and staggers
    pub timing: TimingConfig,

    /// Seed for random staggers; entropy when absent
    pub stagger_seed: Option<u64>,
}

/// Static copy of the hero section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroContent {
    /// Large decorative brand text
    pub brand: String,
    pub heading_lines: Vec<String>,
    pub subheading: String,
    pub description: String,
    pub freelancers_count: String,
    pub primary_cta: String,
    pub secondary_cta: String,
    pub vocabulary: MarqueeVocabulary,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            brand: "GIGLANCE".to_string(),
            heading_lines: vec!["Freelance Jobs and Talents at Your Fingertips".to_string()],
            subheading: "Find Your Dream Job".to_string(),
            description: "Connect with top freelancers and clients on our platform! \
                          Find your perfect match for your next project."
                .to_string(),
            freelancers_count: "Over 12800+ freelancers to complete your projects".to_string(),
            primary_cta: "Find Jobs".to_string(),
            secondary_cta: "Hire Talent".to_string(),
            vocabulary: MarqueeVocabulary::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub marquee: MarqueeTiming,
    pub entrance: EntranceTiming,
}

/// Timing of the marquee loop and of the row reveal, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeTiming {
    /// Time to scroll one tile
    pub loop_duration: f32,
    pub loop_ease: Ease,

    pub reveal_delay: f32,
    pub reveal_duration: f32,
    pub reveal_stagger: f32,
    pub reveal_ease: Ease,
    /// Rows rise from this far below their resting place
    pub reveal_offset: f32,
    /// Resting opacity of the background rows
    pub row_opacity: f32,
}

impl Default for MarqueeTiming {
    fn default() -> Self {
        Self {
            loop_duration: 200.0,
            loop_ease: Ease::Linear,
            reveal_delay: 0.2,
            reveal_duration: 1.5,
            reveal_stagger: 0.6,
            reveal_ease: Ease::Power2Out,
            reveal_offset: 100.0,
            row_opacity: 0.2,
        }
    }
}

/// One step of the entrance timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentTiming {
    /// Initial vertical offset in pixels
    pub offset_y: f32,
    pub duration: f32,
    pub stagger: Stagger,
}

/// A segment as written in a config file; absent keys keep the defaults of
/// the step being configured.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SegmentOverride {
    offset_y: Option<f32>,
    duration: Option<f32>,
    stagger: Option<Stagger>,
}

impl SegmentOverride {
    fn apply(self, base: SegmentTiming) -> SegmentTiming {
        SegmentTiming {
            offset_y: self.offset_y.unwrap_or(base.offset_y),
            duration: self.duration.unwrap_or(base.duration),
            stagger: self.stagger.unwrap_or(base.stagger),
        }
    }
}

fn merge_segment<'de, D>(
    deserializer: D,
    pick: fn(EntranceTiming) -> SegmentTiming,
) -> std::result::Result<SegmentTiming, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = SegmentOverride::deserialize(deserializer)?;
    Ok(overrides.apply(pick(EntranceTiming::default())))
}

fn brand_segment<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<SegmentTiming, D::Error> {
    merge_segment(d, |timing| timing.brand)
}

fn subheading_segment<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<SegmentTiming, D::Error> {
    merge_segment(d, |timing| timing.subheading)
}

fn heading_segment<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<SegmentTiming, D::Error> {
    merge_segment(d, |timing| timing.heading)
}

fn content_segment<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<SegmentTiming, D::Error> {
    merge_segment(d, |timing| timing.content)
}

/// Timing of the entrance timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceTiming {
    /// Wait before building the timeline, letting layout settle
    pub start_delay_ms: u64,
    /// Delay of the timeline itself, in seconds
    pub timeline_delay: f32,
    /// Each step after the first starts this long before the previous ends
    pub overlap: f32,
    pub ease: Ease,
    #[serde(deserialize_with = "brand_segment")]
    pub brand: SegmentTiming,
    #[serde(deserialize_with = "subheading_segment")]
    pub subheading: SegmentTiming,
    #[serde(deserialize_with = "heading_segment")]
    pub heading: SegmentTiming,
    #[serde(deserialize_with = "content_segment")]
    pub content: SegmentTiming,
}

impl Default for EntranceTiming {
    fn default() -> Self {
        Self {
            start_delay_ms: 100,
            timeline_delay: 0.7,
            overlap: 1.0,
            ease: Ease::Power2Out,
            brand: SegmentTiming {
                offset_y: 30.0,
                duration: 0.6,
                stagger: Stagger::amount(0.4, StaggerFrom::Random),
            },
            subheading: SegmentTiming {
                offset_y: 30.0,
                duration: 0.6,
                stagger: Stagger::Each(0.2),
            },
            heading: SegmentTiming {
                offset_y: 70.0,
                duration: 0.8,
                stagger: Stagger::Each(0.1),
            },
            content: SegmentTiming {
                offset_y: 0.0,
                duration: 0.6,
                stagger: Stagger::Each(0.1),
            },
        }
    }
}

impl EntranceTiming {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

impl HeroConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON configuration file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading hero configuration from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        let config: HeroConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else the file in the platform config dir if it
    /// exists, else the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                info!("Using configuration at {}", path.display());
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Platform location of [`CONFIG_FILE_NAME`]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "giglance", "hero")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        let marquee = &self.timing.marquee;
        if !(marquee.loop_duration > 0.0) {
            return Err(HeroError::Configuration(format!(
                "marquee loop duration must be positive, got {}",
                marquee.loop_duration
            )));
        }
        if !(0.0..=1.0).contains(&marquee.row_opacity) {
            return Err(HeroError::Configuration(format!(
                "row opacity must be within 0..=1, got {}",
                marquee.row_opacity
            )));
        }
        let entrance = &self.timing.entrance;
        for (name, segment) in [
            ("brand", &entrance.brand),
            ("subheading", &entrance.subheading),
            ("heading", &entrance.heading),
            ("content", &entrance.content),
        ] {
            if segment.duration < 0.0 || segment.duration.is_nan() {
                return Err(HeroError::Configuration(format!(
                    "{name} duration must not be negative"
                )));
            }
        }
        Ok(())
    }

    /// Random source for staggers
    pub fn rng(&self) -> StdRng {
        match self.stagger_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: MarqueeVocabulary) -> Self {
        self.content.vocabulary = vocabulary;
        self
    }

    pub fn with_subheading<S: Into<String>>(mut self, subheading: S) -> Self {
        self.content.subheading = subheading.into();
        self
    }

    pub fn with_heading_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content.heading_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.stagger_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = HeroConfig::default();
        assert_eq!(config.content.vocabulary.len(), 5);
        assert_eq!(config.timing.marquee.loop_duration, 200.0);
        assert_eq!(config.timing.entrance.start_delay(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hero.json");
        std::fs::write(
            &path,
            r#"{ "content": { "subheading": "Hire Faster" }, "stagger_seed": 9 }"#,
        )
        .unwrap();

        let config = HeroConfig::from_file(&path).unwrap();
        assert_eq!(config.content.subheading, "Hire Faster");
        assert_eq!(config.content.brand, "GIGLANCE");
        assert_eq!(config.stagger_seed, Some(9));
        assert_eq!(config.timing, TimingConfig::default());
    }

    #[test]
    fn test_partial_segment_keeps_its_own_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hero.json");
        std::fs::write(
            &path,
            r#"{ "timing": { "entrance": { "brand": { "duration": 1 }, "heading": { "offset_y": 20 } } } }"#,
        )
        .unwrap();

        let config = HeroConfig::from_file(&path).unwrap();
        let defaults = EntranceTiming::default();
        let entrance = &config.timing.entrance;
        assert_eq!(
            entrance.brand,
            SegmentTiming {
                duration: 1.0,
                ..defaults.brand
            }
        );
        assert_eq!(
            entrance.heading,
            SegmentTiming {
                offset_y: 20.0,
                ..defaults.heading
            }
        );
        assert_eq!(entrance.subheading, defaults.subheading);
        assert_eq!(entrance.content, defaults.content);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hero.json");
        let config = HeroConfig::new().with_seed(3).with_subheading("");
        config.save(&path).unwrap();
        assert_eq!(HeroConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hero.json");

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            HeroConfig::from_file(&path),
            Err(HeroError::Serialization(_))
        ));

        std::fs::write(&path, r#"{ "content": { "vocabulary": [] } }"#).unwrap();
        assert!(HeroConfig::from_file(&path).is_err());

        std::fs::write(&path, r#"{ "timing": { "marquee": { "loop_duration": 0 } } }"#).unwrap();
        assert!(matches!(
            HeroConfig::from_file(&path),
            Err(HeroError::Configuration(_))
        ));

        assert!(matches!(
            HeroConfig::from_file(dir.path().join("missing.json")),
            Err(HeroError::Io(_))
        ));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng as _;
        let config = HeroConfig::new().with_seed(42);
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }
}
