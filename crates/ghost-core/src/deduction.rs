//! Narrowing the suspect list from recorded evidence.

use std::cmp::Ordering;

use contracts::{GhostType, Personality};

use crate::registry::{GhostProfile, GhostRegistry};
use crate::session::EvidenceEntry;

fn explains(profile: &GhostProfile, entry: &EvidenceEntry) -> bool {
    match entry {
        EvidenceEntry::SpiritBoxResponse {
            question, answer, ..
        } => profile
            .word_pools
            .get(question)
            .is_some_and(|pools| pools.pool(answer.category).contains(&answer.word)),
        EvidenceEntry::Photo { manifestation, .. } => {
            profile.manifestation_probability(*manifestation) > 0.0
        }
        EvidenceEntry::Thermal { reading, .. } => profile.thermal_reading == *reading,
        EvidenceEntry::EmfReading {
            base_level,
            observed_level,
            ..
        } => match observed_level.cmp(base_level) {
            Ordering::Equal => true,
            Ordering::Greater => matches!(
                profile.emf.personality,
                Personality::Aggressive | Personality::Chaotic | Personality::Contradictory
            ),
            Ordering::Less => matches!(
                profile.emf.personality,
                Personality::Shy | Personality::Chaotic | Personality::Contradictory
            ),
        },
        EvidenceEntry::SpiritBoxLocked { .. }
        | EvidenceEntry::SpiritBoxLost { .. }
        | EvidenceEntry::SpiritBoxSilence { .. } => true,
    }
}

/// Ghost types whose profiles could have produced every entry in `evidence`.
pub fn consistent_ghosts(registry: &GhostRegistry, evidence: &[EvidenceEntry]) -> Vec<GhostType> {
    registry
        .profiles()
        .filter(|profile| evidence.iter().all(|entry| explains(profile, entry)))
        .map(|profile| profile.ghost_type)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ManifestationKind, QuestionId, SelectedWord, ThermalReading, WordCategory};

    #[test]
    fn no_evidence_keeps_every_suspect() {
        let registry = GhostRegistry::standard();
        assert_eq!(consistent_ghosts(&registry, &[]), GhostType::ALL.to_vec());
    }

    #[test]
    fn combined_evidence_narrows_to_one() {
        let registry = GhostRegistry::standard();
        let evidence = [
            EvidenceEntry::Thermal {
                tick: 0,
                reading: ThermalReading::DeepCold,
            },
            EvidenceEntry::Photo {
                tick: 1,
                manifestation: ManifestationKind::ScreamingFace,
            },
        ];
        assert_eq!(consistent_ghosts(&registry, &evidence), vec![GhostType::Wraith]);
    }

    #[test]
    fn unique_word_is_a_signature() {
        let registry = GhostRegistry::standard();
        let evidence = [EvidenceEntry::SpiritBoxResponse {
            tick: 4,
            question: QuestionId::Location,
            answer: SelectedWord {
                word: "mirror".to_string(),
                category: WordCategory::Unique,
            },
        }];
        assert_eq!(consistent_ghosts(&registry, &evidence), vec![GhostType::Phantom]);
    }

    #[test]
    fn emf_surge_rules_out_shy_ghosts() {
        let registry = GhostRegistry::standard();
        let evidence = [EvidenceEntry::EmfReading {
            tick: 2,
            distance_m: 4.0,
            base_level: 3,
            observed_level: 4,
        }];
        assert_eq!(
            consistent_ghosts(&registry, &evidence),
            vec![
                GhostType::Wraith,
                GhostType::Poltergeist,
                GhostType::Onyx,
                GhostType::Trickster,
            ]
        );
    }
}
