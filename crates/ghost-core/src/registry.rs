//! Immutable ghost profile registry.
//!
//! `GhostRegistry::standard()` builds the shipped seven-ghost table once; callers
//! hold it by value or reference and only ever read from it. Alternate registries
//! (for example deliberately broken ones in tests) go through `from_profiles`.

use std::collections::BTreeMap;

use contracts::{
    CameraManifestation, GhostType, ManifestationKind as M, Personality, QuestionId,
    SpiritBoxSignature, ThermalReading, WordPools,
};
use serde::Serialize;

use crate::emf::EmfBehavior;
use crate::error::CoreError;
use crate::words;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GhostProfile {
    pub ghost_type: GhostType,
    pub personality: Personality,
    pub response_frequency: f64,
    pub emf: EmfBehavior,
    pub word_pools: BTreeMap<QuestionId, WordPools>,
    pub spirit_box: SpiritBoxSignature,
    pub camera_manifestations: Vec<CameraManifestation>,
    pub thermal_reading: ThermalReading,
}

impl GhostProfile {
    pub fn word_pools(&self, question: QuestionId) -> Result<&WordPools, CoreError> {
        self.word_pools
            .get(&question)
            .ok_or(CoreError::QuestionNotConfigured {
                ghost: self.ghost_type,
                question,
            })
    }

    pub fn manifestation_probability(&self, kind: M) -> f64 {
        self.camera_manifestations
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.probability)
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GhostRegistry {
    profiles: BTreeMap<GhostType, GhostProfile>,
}

impl GhostRegistry {
    pub fn standard() -> Self {
        Self::from_profiles(STANDARD_PROFILES.iter().map(ProfileSeed::build))
    }

    /// Later profiles replace earlier ones for the same ghost type.
    pub fn from_profiles<I>(profiles: I) -> Self
    where
        I: IntoIterator<Item = GhostProfile>,
    {
        Self {
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.ghost_type, profile))
                .collect(),
        }
    }

    pub fn profile(&self, ghost: GhostType) -> Result<&GhostProfile, CoreError> {
        self.profiles
            .get(&ghost)
            .ok_or(CoreError::GhostNotRegistered(ghost))
    }

    pub fn profiles(&self) -> impl Iterator<Item = &GhostProfile> {
        self.profiles.values()
    }

    pub fn ghost_types(&self) -> impl Iterator<Item = GhostType> + '_ {
        self.profiles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn word_pools(&self, ghost: GhostType, question: QuestionId) -> Result<&WordPools, CoreError> {
        self.profile(ghost)?.word_pools(question)
    }

    pub fn personality(&self, ghost: GhostType) -> Result<Personality, CoreError> {
        Ok(self.profile(ghost)?.personality)
    }

    pub fn response_frequency(&self, ghost: GhostType) -> Result<f64, CoreError> {
        Ok(self.profile(ghost)?.response_frequency)
    }
}

struct ProfileSeed {
    ghost: GhostType,
    personality: Personality,
    emf_personality: Personality,
    signature: (f64, f64, f64),
    camera: &'static [(M, f64)],
    thermal: ThermalReading,
}

impl ProfileSeed {
    fn build(&self) -> GhostProfile {
        GhostProfile {
            ghost_type: self.ghost,
            personality: self.personality,
            response_frequency: self.personality.response_frequency(),
            emf: EmfBehavior::for_personality(self.emf_personality),
            word_pools: QuestionId::ALL
                .into_iter()
                .map(|question| {
                    (
                        question,
                        words::word_pools(self.ghost, self.personality, question),
                    )
                })
                .collect(),
            spirit_box: SpiritBoxSignature {
                knob_a: self.signature.0,
                knob_b: self.signature.1,
                tolerance: self.signature.2,
            },
            camera_manifestations: self
                .camera
                .iter()
                .map(|(kind, probability)| CameraManifestation {
                    kind: *kind,
                    probability: *probability,
                })
                .collect(),
            thermal_reading: self.thermal,
        }
    }
}

// Every manifestation kind, thermal reading and EMF personality below is shared by
// at least two ghosts. Phantom's near-certain `invisible` is the one singular trait.
static STANDARD_PROFILES: [ProfileSeed; 7] = [
    ProfileSeed {
        ghost: GhostType::Wraith,
        personality: Personality::Aggressive,
        emf_personality: Personality::Aggressive,
        signature: (0.82, 0.27, 0.008),
        camera: &[
            (M::ShadowSilhouette, 0.5),
            (M::ScreamingFace, 0.3),
            (M::MotionBlur, 0.2),
        ],
        thermal: ThermalReading::DeepCold,
    },
    ProfileSeed {
        ghost: GhostType::Shade,
        personality: Personality::Shy,
        emf_personality: Personality::Shy,
        signature: (0.15, 0.64, 0.010),
        camera: &[
            (M::FaintSilhouette, 0.6),
            (M::ShadowSilhouette, 0.3),
            (M::FaintGlitch, 0.1),
        ],
        thermal: ThermalReading::ColdSpot,
    },
    ProfileSeed {
        ghost: GhostType::Poltergeist,
        personality: Personality::Chaotic,
        emf_personality: Personality::Chaotic,
        signature: (0.47, 0.91, 0.008),
        camera: &[
            (M::MotionBlur, 0.5),
            (M::GlitchStreaks, 0.4),
            (M::HalfFormedBody, 0.1),
        ],
        thermal: ThermalReading::Normal,
    },
    ProfileSeed {
        ghost: GhostType::Banshee,
        personality: Personality::Shy,
        emf_personality: Personality::Shy,
        signature: (0.33, 0.12, 0.010),
        camera: &[
            (M::ScreamingFace, 0.5),
            (M::HalfFormedBody, 0.3),
            (M::FaintSilhouette, 0.2),
        ],
        thermal: ThermalReading::ColdSpot,
    },
    ProfileSeed {
        ghost: GhostType::Phantom,
        personality: Personality::Shy,
        emf_personality: Personality::Shy,
        signature: (0.71, 0.58, 0.006),
        camera: &[(M::Invisible, 0.9), (M::FaintGlitch, 0.1)],
        thermal: ThermalReading::ColdSpot,
    },
    ProfileSeed {
        ghost: GhostType::Onyx,
        personality: Personality::Aggressive,
        emf_personality: Personality::Aggressive,
        signature: (0.06, 0.39, 0.008),
        camera: &[
            (M::HalfFormedBody, 0.5),
            (M::ShadowSilhouette, 0.3),
            (M::MotionBlur, 0.2),
        ],
        thermal: ThermalReading::DeepCold,
    },
    ProfileSeed {
        ghost: GhostType::Trickster,
        personality: Personality::Contradictory,
        emf_personality: Personality::Chaotic,
        signature: (0.58, 0.76, 0.006),
        camera: &[
            (M::GlitchStreaks, 0.4),
            (M::FaintGlitch, 0.3),
            (M::FaintSilhouette, 0.3),
        ],
        thermal: ThermalReading::Normal,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_holds_every_ghost() {
        let registry = GhostRegistry::standard();
        assert_eq!(registry.len(), GhostType::ALL.len());
        assert_eq!(registry.ghost_types().collect::<Vec<_>>(), GhostType::ALL.to_vec());
    }

    #[test]
    fn trickster_is_pinned_to_aggressive_rate() {
        let registry = GhostRegistry::standard();
        assert_eq!(
            registry.personality(GhostType::Trickster),
            Ok(Personality::Contradictory)
        );
        assert_eq!(registry.response_frequency(GhostType::Trickster), Ok(0.75));
        assert_eq!(registry.response_frequency(GhostType::Banshee), Ok(0.35));
        assert_eq!(registry.response_frequency(GhostType::Poltergeist), Ok(0.55));
    }

    #[test]
    fn missing_ghost_is_an_error_not_a_default() {
        let registry = GhostRegistry::from_profiles(
            GhostRegistry::standard()
                .profiles()
                .filter(|profile| profile.ghost_type != GhostType::Onyx)
                .cloned(),
        );
        assert_eq!(
            registry.word_pools(GhostType::Onyx, QuestionId::Intent),
            Err(CoreError::GhostNotRegistered(GhostType::Onyx))
        );
    }

    #[test]
    fn missing_question_is_an_error() {
        let mut profile = GhostRegistry::standard()
            .profile(GhostType::Shade)
            .cloned()
            .expect("shade registered");
        profile.word_pools.remove(&QuestionId::Location);
        let registry = GhostRegistry::from_profiles([profile]);
        assert_eq!(
            registry.word_pools(GhostType::Shade, QuestionId::Location),
            Err(CoreError::QuestionNotConfigured {
                ghost: GhostType::Shade,
                question: QuestionId::Location,
            })
        );
    }

    #[test]
    fn manifestation_probability_sums_matching_entries() {
        let registry = GhostRegistry::standard();
        let phantom = registry.profile(GhostType::Phantom).expect("phantom registered");
        assert_eq!(phantom.manifestation_probability(M::Invisible), 0.9);
        assert_eq!(phantom.manifestation_probability(M::ScreamingFace), 0.0);
    }
}
