//! Spirit-box response gate, contextual word draw, and camera manifestation roll.

use contracts::{
    GhostType, ManifestationKind, Personality, QuestionId, SelectedWord, WordCategory,
};
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::error::CoreError;
use crate::registry::{GhostProfile, GhostRegistry};

/// Upper bounds (exclusive) of the common and personality tiers on a [0, 1) roll.
/// Whatever is left above the personality bound draws a unique word.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TierBounds {
    common: f64,
    personality: f64,
}

impl TierBounds {
    fn for_personality(personality: Personality) -> Self {
        match personality {
            Personality::Contradictory => Self {
                common: 0.40,
                personality: 0.85,
            },
            _ => Self {
                common: 0.30,
                personality: 0.85,
            },
        }
    }

    fn category(self, roll: f64) -> WordCategory {
        if roll < self.common {
            WordCategory::Common
        } else if roll < self.personality {
            WordCategory::Personality
        } else {
            WordCategory::Unique
        }
    }
}

/// Picks one answer word for `question`.
///
/// # Panics
///
/// Panics when the drawn tier is empty. Registries that pass
/// `validate_deduction_overlap` never have empty tiers.
pub fn select_contextual_word<R>(
    registry: &GhostRegistry,
    ghost: GhostType,
    question: QuestionId,
    rng: &mut R,
) -> Result<SelectedWord, CoreError>
where
    R: Rng + ?Sized,
{
    select_word_for_profile(registry.profile(ghost)?, question, rng)
}

/// Profile-level form of [`select_contextual_word`], used by sessions holding their own profile.
pub fn select_word_for_profile<R>(
    profile: &GhostProfile,
    question: QuestionId,
    rng: &mut R,
) -> Result<SelectedWord, CoreError>
where
    R: Rng + ?Sized,
{
    let ghost = profile.ghost_type;
    let pools = profile.word_pools(question)?;

    let roll = rng.random::<f64>();
    let category = TierBounds::for_personality(profile.personality).category(roll);
    let word = pools
        .pool(category)
        .choose(rng)
        .unwrap_or_else(|| panic!("empty {category} word pool for {ghost} on {question}"))
        .clone();

    debug!(%ghost, %question, %category, roll, word = %word, "selected spirit box word");
    Ok(SelectedWord { word, category })
}

pub fn should_ghost_respond<R>(
    registry: &GhostRegistry,
    ghost: GhostType,
    rng: &mut R,
) -> Result<bool, CoreError>
where
    R: Rng + ?Sized,
{
    Ok(profile_responds(registry.profile(ghost)?, rng))
}

pub fn profile_responds<R>(profile: &GhostProfile, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    let roll = rng.random::<f64>();
    let responds = roll < profile.response_frequency;
    debug!(
        ghost = %profile.ghost_type,
        roll,
        frequency = profile.response_frequency,
        responds,
        "spirit box response gate"
    );
    responds
}

/// Draws what a photo of the ghost shows, following its manifestation distribution.
pub fn roll_camera_manifestation<R>(
    registry: &GhostRegistry,
    ghost: GhostType,
    rng: &mut R,
) -> Result<Option<ManifestationKind>, CoreError>
where
    R: Rng + ?Sized,
{
    Ok(roll_manifestation_for_profile(registry.profile(ghost)?, rng))
}

/// Rounding slack in the distribution falls through to the last entry.
pub fn roll_manifestation_for_profile<R>(profile: &GhostProfile, rng: &mut R) -> Option<ManifestationKind>
where
    R: Rng + ?Sized,
{
    let manifestations = &profile.camera_manifestations;
    let mut cursor = rng.random::<f64>();
    for entry in manifestations {
        let weight = entry.probability.max(0.0);
        if cursor < weight {
            return Some(entry.kind);
        }
        cursor -= weight;
    }
    manifestations.last().map(|entry| entry.kind)
}
