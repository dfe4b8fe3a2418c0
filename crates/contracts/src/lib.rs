//! v1 cross-boundary contracts shared by the deduction core, the session layer, and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION_V1: &str = "1.0";

/// Knob positions and signature targets live on this closed interval.
pub const KNOB_MIN: f64 = 0.0;
pub const KNOB_MAX: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown ghost type: {0}")]
    UnknownGhostType(String),
    #[error("unknown question id: {0}")]
    UnknownQuestion(String),
    #[error("unknown personality: {0}")]
    UnknownPersonality(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GhostType {
    Wraith,
    Shade,
    Poltergeist,
    Banshee,
    Phantom,
    Onyx,
    Trickster,
}

impl GhostType {
    pub const ALL: [GhostType; 7] = [
        GhostType::Wraith,
        GhostType::Shade,
        GhostType::Poltergeist,
        GhostType::Banshee,
        GhostType::Phantom,
        GhostType::Onyx,
        GhostType::Trickster,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wraith => "wraith",
            Self::Shade => "shade",
            Self::Poltergeist => "poltergeist",
            Self::Banshee => "banshee",
            Self::Phantom => "phantom",
            Self::Onyx => "onyx",
            Self::Trickster => "trickster",
        }
    }
}

impl fmt::Display for GhostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GhostType {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|ghost| ghost.as_str() == needle)
            .ok_or_else(|| ParseError::UnknownGhostType(raw.to_string()))
    }
}

/// Behavioral category governing response frequency and the shared word pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Aggressive,
    Shy,
    Chaotic,
    /// Draws from every other personality's pool. Only the Trickster has it.
    Contradictory,
}

impl Personality {
    /// Personalities that own a word pool of their own.
    pub const POOLED: [Personality; 3] = [
        Personality::Aggressive,
        Personality::Shy,
        Personality::Chaotic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Shy => "shy",
            Self::Chaotic => "chaotic",
            Self::Contradictory => "contradictory",
        }
    }

    /// Probability that a ghost of this personality answers a spirit-box question.
    ///
    /// Contradictory ghosts talk as often as aggressive ones; only their content is erratic.
    pub fn response_frequency(self) -> f64 {
        match self {
            Self::Aggressive | Self::Contradictory => 0.75,
            Self::Shy => 0.35,
            Self::Chaotic => 0.55,
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Personality {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "aggressive" => Ok(Self::Aggressive),
            "shy" => Ok(Self::Shy),
            "chaotic" => Ok(Self::Chaotic),
            "contradictory" => Ok(Self::Contradictory),
            _ => Err(ParseError::UnknownPersonality(raw.to_string())),
        }
    }
}

/// Spirit-box questions. Wire ids are `q1`..`q3`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionId {
    /// "What do you want?"
    #[serde(rename = "q1")]
    Intent,
    /// "Where are you?"
    #[serde(rename = "q2")]
    Location,
    /// "Are you here with us?"
    #[serde(rename = "q3")]
    Confirmation,
}

impl QuestionId {
    pub const ALL: [QuestionId; 3] = [
        QuestionId::Intent,
        QuestionId::Location,
        QuestionId::Confirmation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intent => "q1",
            Self::Location => "q2",
            Self::Confirmation => "q3",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::Intent => "What do you want?",
            Self::Location => "Where are you?",
            Self::Confirmation => "Are you here with us?",
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionId {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "q1" | "intent" => Ok(Self::Intent),
            "q2" | "location" => Ok(Self::Location),
            "q3" | "confirmation" => Ok(Self::Confirmation),
            _ => Err(ParseError::UnknownQuestion(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WordCategory {
    Common,
    Personality,
    Unique,
}

impl WordCategory {
    pub const ALL: [WordCategory; 3] = [
        WordCategory::Common,
        WordCategory::Personality,
        WordCategory::Unique,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Personality => "personality",
            Self::Unique => "unique",
        }
    }
}

impl fmt::Display for WordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ManifestationKind {
    FaintSilhouette,
    MotionBlur,
    ScreamingFace,
    Invisible,
    HalfFormedBody,
    ShadowSilhouette,
    GlitchStreaks,
    FaintGlitch,
}

impl ManifestationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FaintSilhouette => "faint_silhouette",
            Self::MotionBlur => "motion_blur",
            Self::ScreamingFace => "screaming_face",
            Self::Invisible => "invisible",
            Self::HalfFormedBody => "half_formed_body",
            Self::ShadowSilhouette => "shadow_silhouette",
            Self::GlitchStreaks => "glitch_streaks",
            Self::FaintGlitch => "faint_glitch",
        }
    }
}

impl fmt::Display for ManifestationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ThermalReading {
    Normal,
    ColdSpot,
    DeepCold,
}

impl ThermalReading {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::ColdSpot => "cold_spot",
            Self::DeepCold => "deep_cold",
        }
    }
}

impl fmt::Display for ThermalReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate answers for one ghost and one question, split by selection tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordPools {
    pub common: Vec<String>,
    pub personality: Vec<String>,
    pub unique: Vec<String>,
}

impl WordPools {
    pub fn pool(&self, category: WordCategory) -> &[String] {
        match category {
            WordCategory::Common => &self.common,
            WordCategory::Personality => &self.personality,
            WordCategory::Unique => &self.unique,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        WordCategory::ALL
            .into_iter()
            .any(|category| self.pool(category).iter().any(|candidate| candidate == word))
    }
}

/// Two target knob values a player must dial in, plus the lock tolerance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpiritBoxSignature {
    pub knob_a: f64,
    pub knob_b: f64,
    pub tolerance: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CameraManifestation {
    pub kind: ManifestationKind,
    pub probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedWord {
    pub word: String,
    pub category: WordCategory,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct KnobPositions {
    pub a: f64,
    pub b: f64,
}

impl KnobPositions {
    pub fn clamped(a: f64, b: f64) -> Self {
        fn clamp(value: f64) -> f64 {
            if value.is_nan() {
                KNOB_MIN
            } else {
                value.clamp(KNOB_MIN, KNOB_MAX)
            }
        }
        Self {
            a: clamp(a),
            b: clamp(b),
        }
    }
}

/// Gameplay tuning constants. Every field has a default, so partial JSON files load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TuningConfig {
    pub schema_version: String,
    pub seed: u64,
    /// Upper distance bound (metres) for EMF levels 5, 4, 3, 2 and 1, ascending.
    pub emf_breakpoints_m: [f64; 5],
    /// Wide band used for "getting close" feedback on the spirit box. Must be at
    /// least as wide as the lock tolerance of whichever ghost it is applied to.
    pub lock_close_tolerance: f64,
    pub question_cooldown_ticks: u64,
}

impl TuningConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != SCHEMA_VERSION_V1 {
            return Err(format!(
                "unsupported schema_version {} (expected {SCHEMA_VERSION_V1})",
                self.schema_version
            ));
        }
        let mut previous = 0.0_f64;
        for (idx, bound) in self.emf_breakpoints_m.iter().enumerate() {
            if !bound.is_finite() || *bound <= previous {
                return Err(format!(
                    "emf_breakpoints_m[{idx}]={bound} must be finite and greater than {previous}"
                ));
            }
            previous = *bound;
        }
        if !(self.lock_close_tolerance > 0.0 && self.lock_close_tolerance <= KNOB_MAX) {
            return Err(format!(
                "lock_close_tolerance={} must be in (0, 1]",
                self.lock_close_tolerance
            ));
        }
        Ok(())
    }

    /// Checks the close band against one ghost's lock band; a narrower close band
    /// would make the "close" feedback unreachable.
    pub fn check_close_band(&self, lock_tolerance: f64) -> Result<(), String> {
        if self.lock_close_tolerance < lock_tolerance {
            return Err(format!(
                "lock_close_tolerance={} is narrower than the lock tolerance {lock_tolerance}",
                self.lock_close_tolerance
            ));
        }
        Ok(())
    }
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            seed: 1337,
            emf_breakpoints_m: [1.5, 3.0, 5.0, 8.0, 12.0],
            lock_close_tolerance: 0.08,
            question_cooldown_ticks: 3,
        }
    }
}
