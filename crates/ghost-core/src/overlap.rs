//! Deduction-overlap validation.
//!
//! The mini-game is only fair if no single observation pins down the ghost. For
//! every discrete trait category this module maps each trait value to the ghosts
//! exhibiting it and flags values owned by a single ghost. Phantom's near-certain
//! `invisible` photo is the one sanctioned singular signature.
//!
//! Unique-tier spirit-box words are signature words by construction and are not
//! part of the overlap check.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::io::{self, Write};

use contracts::{
    GhostType, ManifestationKind, Personality, QuestionId, ThermalReading, WordCategory,
    KNOB_MAX, KNOB_MIN,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::registry::{GhostProfile, GhostRegistry};

const PROBABILITY_SUM_TOLERANCE: f64 = 0.01;
const SINGULAR_SIGNATURE_MIN_PROBABILITY: f64 = 0.9;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverlapReport {
    pub emf_personalities: BTreeMap<Personality, Vec<GhostType>>,
    pub camera_manifestations: BTreeMap<ManifestationKind, Vec<GhostType>>,
    pub thermal_readings: BTreeMap<ThermalReading, Vec<GhostType>>,
    pub spirit_box_words: BTreeMap<String, Vec<GhostType>>,
    pub uniquely_identifiable_ghosts: Vec<GhostType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// A trait value owned by exactly one ghost.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SingularTrait {
    category: &'static str,
    value: String,
    ghost: GhostType,
}

fn is_sanctioned_singular(registry: &GhostRegistry, kind: ManifestationKind, owner: GhostType) -> bool {
    kind == ManifestationKind::Invisible
        && owner == GhostType::Phantom
        && registry
            .profile(owner)
            .map(|profile| {
                profile.manifestation_probability(kind) >= SINGULAR_SIGNATURE_MIN_PROBABILITY
            })
            .unwrap_or(false)
}

fn insert_owner<K: Ord>(map: &mut BTreeMap<K, BTreeSet<GhostType>>, key: K, ghost: GhostType) {
    map.entry(key).or_default().insert(ghost);
}

fn flatten<K: Ord>(map: BTreeMap<K, BTreeSet<GhostType>>) -> BTreeMap<K, Vec<GhostType>> {
    map.into_iter()
        .map(|(key, owners)| (key, owners.into_iter().collect()))
        .collect()
}

fn singular_in<K: Display>(
    category: &'static str,
    map: &BTreeMap<K, Vec<GhostType>>,
    exempt: impl Fn(&K, GhostType) -> bool,
) -> Vec<SingularTrait> {
    map.iter()
        .filter_map(|(value, owners)| match owners.as_slice() {
            [ghost] if !exempt(value, *ghost) => Some(SingularTrait {
                category,
                value: value.to_string(),
                ghost: *ghost,
            }),
            _ => None,
        })
        .collect()
}

fn singular_traits(registry: &GhostRegistry, report: &OverlapReport) -> Vec<SingularTrait> {
    let mut singular = Vec::new();
    singular.extend(singular_in("emf personality", &report.emf_personalities, |_, _| false));
    singular.extend(singular_in(
        "camera manifestation",
        &report.camera_manifestations,
        |kind, ghost| is_sanctioned_singular(registry, *kind, ghost),
    ));
    singular.extend(singular_in("thermal reading", &report.thermal_readings, |_, _| false));
    singular.extend(singular_in("spirit box word", &report.spirit_box_words, |_, _| false));
    singular
}

pub fn generate_overlap_report(registry: &GhostRegistry) -> OverlapReport {
    let mut emf = BTreeMap::new();
    let mut camera = BTreeMap::new();
    let mut thermal = BTreeMap::new();
    let mut words = BTreeMap::new();

    for profile in registry.profiles() {
        let ghost = profile.ghost_type;
        insert_owner(&mut emf, profile.emf.personality, ghost);
        insert_owner(&mut thermal, profile.thermal_reading, ghost);
        for entry in profile
            .camera_manifestations
            .iter()
            .filter(|entry| entry.probability > 0.0)
        {
            insert_owner(&mut camera, entry.kind, ghost);
        }
        for pools in profile.word_pools.values() {
            for word in pools.common.iter().chain(pools.personality.iter()) {
                insert_owner(&mut words, word.clone(), ghost);
            }
        }
    }

    let mut report = OverlapReport {
        emf_personalities: flatten(emf),
        camera_manifestations: flatten(camera),
        thermal_readings: flatten(thermal),
        spirit_box_words: flatten(words),
        uniquely_identifiable_ghosts: Vec::new(),
    };
    report.uniquely_identifiable_ghosts = singular_traits(registry, &report)
        .into_iter()
        .map(|singular| singular.ghost)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    report
}

fn integrity_errors(profile: &GhostProfile) -> Vec<String> {
    let ghost = profile.ghost_type;
    let mut errors = Vec::new();

    if !(0.0..=1.0).contains(&profile.response_frequency) {
        errors.push(format!(
            "{ghost}: response frequency {} outside [0, 1]",
            profile.response_frequency
        ));
    }
    if !(0.0..=1.0).contains(&profile.emf.fluctuation_chance) {
        errors.push(format!(
            "{ghost}: emf fluctuation chance {} outside [0, 1]",
            profile.emf.fluctuation_chance
        ));
    }

    for question in QuestionId::ALL {
        match profile.word_pools.get(&question) {
            None => errors.push(format!("{ghost}: no word pools for {question}")),
            Some(pools) => {
                for category in WordCategory::ALL {
                    if pools.pool(category).is_empty() {
                        errors.push(format!("{ghost}: empty {category} word pool for {question}"));
                    }
                }
            }
        }
    }

    let signature = &profile.spirit_box;
    for (label, value) in [("knob_a", signature.knob_a), ("knob_b", signature.knob_b)] {
        if !(KNOB_MIN..=KNOB_MAX).contains(&value) {
            errors.push(format!("{ghost}: spirit box {label} {value} outside [0, 1]"));
        }
    }
    if !(signature.tolerance > 0.0 && signature.tolerance <= KNOB_MAX) {
        errors.push(format!(
            "{ghost}: spirit box tolerance {} outside (0, 1]",
            signature.tolerance
        ));
    }

    if profile.camera_manifestations.is_empty() {
        errors.push(format!("{ghost}: no camera manifestations"));
    } else {
        for entry in &profile.camera_manifestations {
            if !entry.probability.is_finite() {
                errors.push(format!(
                    "{ghost}: non-finite probability {} for {}",
                    entry.probability, entry.kind
                ));
            } else if entry.probability < 0.0 {
                errors.push(format!(
                    "{ghost}: negative probability {} for {}",
                    entry.probability, entry.kind
                ));
            }
        }
        let total = profile
            .camera_manifestations
            .iter()
            .map(|entry| entry.probability)
            .sum::<f64>();
        if !total.is_finite() || (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            errors.push(format!(
                "{ghost}: camera manifestation probabilities sum to {total:.3}, expected 1.0"
            ));
        }
    }

    errors
}

pub fn validate_deduction_overlap(registry: &GhostRegistry) -> ValidationOutcome {
    report_and_validate(registry).1
}

fn report_and_validate(registry: &GhostRegistry) -> (OverlapReport, ValidationOutcome) {
    let mut errors = registry
        .profiles()
        .flat_map(integrity_errors)
        .collect::<Vec<_>>();

    let report = generate_overlap_report(registry);
    for singular in singular_traits(registry, &report) {
        errors.push(format!(
            "{} '{}' is only exhibited by {}",
            singular.category, singular.value, singular.ghost
        ));
    }
    for ghost in &report.uniquely_identifiable_ghosts {
        errors.push(format!("{ghost} is uniquely identifiable by a single trait"));
    }

    let outcome = ValidationOutcome {
        valid: errors.is_empty(),
        errors,
    };
    (report, outcome)
}

fn write_section<K: Display>(
    sink: &mut dyn Write,
    title: &str,
    map: &BTreeMap<K, Vec<GhostType>>,
) -> io::Result<()> {
    writeln!(sink, "{title}:")?;
    for (value, owners) in map {
        let names = owners
            .iter()
            .map(|ghost| ghost.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let marker = if owners.len() < 2 { "  !" } else { "" };
        writeln!(sink, "  {:<20} {names}{marker}", value.to_string())?;
    }
    Ok(())
}

/// Writes a human-readable overlap summary to `sink` and mirrors each failure to the log.
pub fn print_validation_report<W>(
    registry: &GhostRegistry,
    sink: &mut W,
) -> io::Result<ValidationOutcome>
where
    W: Write,
{
    let (report, outcome) = report_and_validate(registry);

    writeln!(sink, "Deduction overlap report ({} ghosts)", registry.len())?;
    write_section(sink, "EMF personalities", &report.emf_personalities)?;
    write_section(sink, "Camera manifestations", &report.camera_manifestations)?;
    write_section(sink, "Thermal readings", &report.thermal_readings)?;
    write_section(sink, "Spirit box words", &report.spirit_box_words)?;

    if report.uniquely_identifiable_ghosts.is_empty() {
        writeln!(sink, "Uniquely identifiable ghosts: none")?;
    } else {
        let names = report
            .uniquely_identifiable_ghosts
            .iter()
            .map(|ghost| ghost.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(sink, "Uniquely identifiable ghosts: {names}")?;
    }

    if outcome.valid {
        writeln!(sink, "Validation: PASSED")?;
        info!(ghosts = registry.len(), "deduction overlap validation passed");
    } else {
        writeln!(sink, "Validation: FAILED ({} errors)", outcome.errors.len())?;
        for error in &outcome.errors {
            writeln!(sink, "  - {error}")?;
            warn!(%error, "deduction overlap violation");
        }
    }

    Ok(outcome)
}
