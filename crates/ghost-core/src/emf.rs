//! EMF meter: distance banding plus per-personality fluctuation.

use contracts::{Personality, TuningConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const EMF_MAX_LEVEL: u8 = 5;

/// How a ghost disturbs the base distance reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmfBehavior {
    /// EMF-facing temperament. This is the trait an investigator can observe.
    pub personality: Personality,
    /// Chance per sample that the reading deviates from the distance band.
    pub fluctuation_chance: f64,
}

impl EmfBehavior {
    pub fn for_personality(personality: Personality) -> Self {
        let fluctuation_chance = match personality {
            Personality::Aggressive => 0.25,
            Personality::Shy => 0.30,
            Personality::Chaotic | Personality::Contradictory => 0.40,
        };
        Self {
            personality,
            fluctuation_chance,
        }
    }
}

/// EMF level for a distance in metres using the default breakpoints.
pub fn calculate_emf_level(distance_m: f64) -> u8 {
    emf_level_with_breakpoints(distance_m, &TuningConfig::default().emf_breakpoints_m)
}

/// `breakpoints[i]` is the furthest distance that still reads level `5 - i`.
/// Callers validate ordering through `TuningConfig::validate`.
pub fn emf_level_with_breakpoints(distance_m: f64, breakpoints: &[f64; 5]) -> u8 {
    if distance_m.is_nan() {
        return 0;
    }
    let beyond = breakpoints
        .iter()
        .filter(|bound| distance_m > **bound)
        .count() as u8;
    EMF_MAX_LEVEL - beyond
}

/// Applies the ghost's fluctuation to a base level. A silent meter (level 0) stays silent.
pub fn observe_emf_level<R>(behavior: &EmfBehavior, base_level: u8, rng: &mut R) -> u8
where
    R: Rng + ?Sized,
{
    let base_level = base_level.min(EMF_MAX_LEVEL);
    if base_level == 0 || rng.random::<f64>() >= behavior.fluctuation_chance {
        return base_level;
    }

    match behavior.personality {
        Personality::Aggressive => (base_level + 1).min(EMF_MAX_LEVEL),
        Personality::Shy => base_level.saturating_sub(1).max(1),
        Personality::Chaotic | Personality::Contradictory => {
            if rng.random_bool(0.5) {
                (base_level + 1).min(EMF_MAX_LEVEL)
            } else {
                base_level.saturating_sub(1).max(1)
            }
        }
    }
}
