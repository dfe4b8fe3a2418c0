use contracts::{
    CameraManifestation, GhostType, ManifestationKind, Personality, QuestionId, ThermalReading,
};
use ghost_core::{
    generate_overlap_report, print_validation_report, validate_deduction_overlap, EmfBehavior,
    GhostProfile, GhostRegistry,
};

fn standard_profile(ghost: GhostType) -> GhostProfile {
    GhostRegistry::standard()
        .profile(ghost)
        .cloned()
        .expect("standard ghost")
}

fn registry_with(replacement: GhostProfile) -> GhostRegistry {
    let ghost = replacement.ghost_type;
    GhostRegistry::from_profiles(
        GhostRegistry::standard()
            .profiles()
            .filter(|profile| profile.ghost_type != ghost)
            .cloned()
            .chain(std::iter::once(replacement)),
    )
}

fn has_error(errors: &[String], needle: &str) -> bool {
    errors.iter().any(|error| error.contains(needle))
}

#[test]
fn unique_thermal_reading_is_rejected() {
    let mut poltergeist = standard_profile(GhostType::Poltergeist);
    poltergeist.thermal_reading = ThermalReading::DeepCold;
    let mut trickster = standard_profile(GhostType::Trickster);
    trickster.thermal_reading = ThermalReading::ColdSpot;
    let registry = registry_with(poltergeist);
    let registry = GhostRegistry::from_profiles(
        registry
            .profiles()
            .filter(|profile| profile.ghost_type != GhostType::Trickster)
            .cloned()
            .chain(std::iter::once(trickster)),
    );

    // normal is now unused; no ghost is singled out by thermal alone.
    let report = generate_overlap_report(&registry);
    assert!(!report.thermal_readings.contains_key(&ThermalReading::Normal));
    assert!(validate_deduction_overlap(&registry).valid);

    let mut shade = standard_profile(GhostType::Shade);
    shade.thermal_reading = ThermalReading::Normal;
    let registry = GhostRegistry::from_profiles(
        registry
            .profiles()
            .filter(|profile| profile.ghost_type != GhostType::Shade)
            .cloned()
            .chain(std::iter::once(shade)),
    );
    let outcome = validate_deduction_overlap(&registry);
    assert!(!outcome.valid);
    assert!(has_error(&outcome.errors, "thermal reading 'normal' is only exhibited by shade"));
    assert!(has_error(&outcome.errors, "shade is uniquely identifiable"));
}

#[test]
fn new_manifestation_kind_on_one_ghost_is_rejected() {
    let mut wraith = standard_profile(GhostType::Wraith);
    wraith.camera_manifestations = vec![
        CameraManifestation {
            kind: ManifestationKind::ShadowSilhouette,
            probability: 0.5,
        },
        CameraManifestation {
            kind: ManifestationKind::GlitchStreaks,
            probability: 0.3,
        },
        CameraManifestation {
            kind: ManifestationKind::Invisible,
            probability: 0.2,
        },
    ];
    let outcome = validate_deduction_overlap(&registry_with(wraith));
    // Invisible is now shared, but screaming_face is left to the Banshee alone.
    assert!(!outcome.valid);
    assert!(has_error(
        &outcome.errors,
        "camera manifestation 'screaming_face' is only exhibited by banshee"
    ));
    assert!(!has_error(&outcome.errors, "'invisible'"));
}

#[test]
fn lone_emf_personality_is_rejected() {
    let mut trickster = standard_profile(GhostType::Trickster);
    trickster.emf = EmfBehavior::for_personality(Personality::Contradictory);
    let outcome = validate_deduction_overlap(&registry_with(trickster));
    assert!(!outcome.valid);
    assert!(has_error(
        &outcome.errors,
        "emf personality 'contradictory' is only exhibited by trickster"
    ));
    assert!(has_error(
        &outcome.errors,
        "emf personality 'chaotic' is only exhibited by poltergeist"
    ));
}

#[test]
fn private_shared_tier_word_is_rejected() {
    let mut banshee = standard_profile(GhostType::Banshee);
    if let Some(pools) = banshee.word_pools.get_mut(&QuestionId::Intent) {
        pools.personality.push("lament".to_string());
    }
    let outcome = validate_deduction_overlap(&registry_with(banshee));
    assert!(!outcome.valid);
    assert!(has_error(
        &outcome.errors,
        "spirit box word 'lament' is only exhibited by banshee"
    ));
}

#[test]
fn malformed_profile_data_is_reported() {
    let mut onyx = standard_profile(GhostType::Onyx);
    onyx.camera_manifestations[0].probability = -0.5;
    onyx.spirit_box.tolerance = 0.0;
    onyx.word_pools.remove(&QuestionId::Confirmation);
    let outcome = validate_deduction_overlap(&registry_with(onyx));
    assert!(!outcome.valid);
    assert!(has_error(&outcome.errors, "onyx: negative probability"));
    assert!(has_error(&outcome.errors, "onyx: camera manifestation probabilities sum to"));
    assert!(has_error(&outcome.errors, "onyx: spirit box tolerance"));
    assert!(has_error(&outcome.errors, "onyx: no word pools for q3"));
}

#[test]
fn nan_manifestation_probability_is_rejected() {
    let mut wraith = standard_profile(GhostType::Wraith);
    wraith.camera_manifestations[0].probability = f64::NAN;
    let outcome = validate_deduction_overlap(&registry_with(wraith));
    assert!(!outcome.valid);
    assert!(has_error(
        &outcome.errors,
        "wraith: non-finite probability NaN for shadow_silhouette"
    ));
    assert!(has_error(
        &outcome.errors,
        "wraith: camera manifestation probabilities sum to"
    ));
}

#[test]
fn infinite_manifestation_probability_is_rejected() {
    let mut banshee = standard_profile(GhostType::Banshee);
    banshee.camera_manifestations[1].probability = f64::INFINITY;
    let outcome = validate_deduction_overlap(&registry_with(banshee));
    assert!(!outcome.valid);
    assert!(has_error(&outcome.errors, "banshee: non-finite probability inf"));
    assert!(has_error(&outcome.errors, "banshee: camera manifestation probabilities sum to"));
}

#[test]
fn empty_registry_is_trivially_balanced() {
    let registry = GhostRegistry::from_profiles(std::iter::empty());
    let outcome = validate_deduction_overlap(&registry);
    assert!(outcome.valid);
    assert!(registry.is_empty());
}

#[test]
fn printed_report_flags_failures() {
    let mut phantom = standard_profile(GhostType::Phantom);
    phantom.camera_manifestations[0].probability = 0.8;
    phantom.camera_manifestations[1].probability = 0.2;
    let registry = registry_with(phantom);

    let mut buffer = Vec::new();
    let outcome = print_validation_report(&registry, &mut buffer).expect("write report");
    let text = String::from_utf8(buffer).expect("utf8");

    assert!(!outcome.valid);
    assert!(text.contains("Uniquely identifiable ghosts: phantom"));
    assert!(text.contains(&format!("Validation: FAILED ({} errors)", outcome.errors.len())));
    assert!(text.contains("invisible"));
}
