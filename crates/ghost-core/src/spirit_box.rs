//! Spirit-box tuning: two independent dials against a ghost's signature.

use contracts::{KnobPositions, SpiritBoxSignature};
use serde::Serialize;

/// Both knobs must independently sit within `tolerance` of their targets.
pub fn check_spirit_box_lock(
    knob_a: f64,
    knob_b: f64,
    target_a: f64,
    target_b: f64,
    tolerance: f64,
) -> bool {
    (knob_a - target_a).abs() <= tolerance && (knob_b - target_b).abs() <= tolerance
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TuningProximity {
    Searching,
    Close,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TuningAssessment {
    pub proximity: TuningProximity,
    pub offset_a: f64,
    pub offset_b: f64,
    /// Per-knob "close" flags, so partial progress can be shown dial by dial.
    pub knob_a_close: bool,
    pub knob_b_close: bool,
}

/// Classifies knob positions against the wide `close_tolerance` band and the
/// signature's own lock tolerance.
pub fn assess_tuning(
    knobs: KnobPositions,
    signature: &SpiritBoxSignature,
    close_tolerance: f64,
) -> TuningAssessment {
    let offset_a = (knobs.a - signature.knob_a).abs();
    let offset_b = (knobs.b - signature.knob_b).abs();

    let proximity = if check_spirit_box_lock(
        knobs.a,
        knobs.b,
        signature.knob_a,
        signature.knob_b,
        signature.tolerance,
    ) {
        TuningProximity::Locked
    } else if check_spirit_box_lock(
        knobs.a,
        knobs.b,
        signature.knob_a,
        signature.knob_b,
        close_tolerance,
    ) {
        TuningProximity::Close
    } else {
        TuningProximity::Searching
    };

    TuningAssessment {
        proximity,
        offset_a,
        offset_b,
        knob_a_close: offset_a <= close_tolerance,
        knob_b_close: offset_b <= close_tolerance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature() -> SpiritBoxSignature {
        SpiritBoxSignature {
            knob_a: 0.5,
            knob_b: 0.25,
            tolerance: 0.0078125,
        }
    }

    #[test]
    fn exact_match_locks() {
        assert!(check_spirit_box_lock(0.5, 0.5, 0.5, 0.5, 0.01));
    }

    #[test]
    fn each_knob_is_checked_independently() {
        assert!(!check_spirit_box_lock(0.5, 0.5, 0.6, 0.5, 0.01));
        assert!(!check_spirit_box_lock(0.5, 0.5, 0.5, 0.6, 0.01));
    }

    #[test]
    fn tolerance_boundary_is_inclusive() {
        assert!(check_spirit_box_lock(0.75, 0.5, 0.5, 0.5, 0.25));
        assert!(!check_spirit_box_lock(0.875, 0.5, 0.5, 0.5, 0.25));
    }

    #[test]
    fn assessment_grades_proximity() {
        let sig = signature();
        let far = assess_tuning(KnobPositions { a: 0.1, b: 0.9 }, &sig, 0.0625);
        assert_eq!(far.proximity, TuningProximity::Searching);
        assert!(!far.knob_a_close && !far.knob_b_close);

        let half = assess_tuning(KnobPositions { a: 0.5, b: 0.9 }, &sig, 0.0625);
        assert_eq!(half.proximity, TuningProximity::Searching);
        assert!(half.knob_a_close);
        assert!(!half.knob_b_close);

        let close = assess_tuning(KnobPositions { a: 0.53125, b: 0.25 }, &sig, 0.0625);
        assert_eq!(close.proximity, TuningProximity::Close);

        let locked = assess_tuning(KnobPositions { a: 0.5, b: 0.2578125 }, &sig, 0.0625);
        assert_eq!(locked.proximity, TuningProximity::Locked);
        assert_eq!(locked.offset_b, 0.0078125);
    }
}
