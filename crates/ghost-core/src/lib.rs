//! Ghost deduction core: profile registry, spirit-box word selection, EMF banding,
//! signal lock, deduction-overlap validation, and a reference investigation session.

pub mod deduction;
pub mod emf;
pub mod error;
pub mod overlap;
pub mod registry;
pub mod selection;
pub mod session;
pub mod spirit_box;
pub mod words;

pub use deduction::consistent_ghosts;
pub use emf::{calculate_emf_level, emf_level_with_breakpoints, observe_emf_level, EmfBehavior};
pub use error::CoreError;
pub use overlap::{
    generate_overlap_report, print_validation_report, validate_deduction_overlap, OverlapReport,
    ValidationOutcome,
};
pub use registry::{GhostProfile, GhostRegistry};
pub use selection::{roll_camera_manifestation, select_contextual_word, should_ghost_respond};
pub use session::{AskOutcome, EvidenceEntry, InvestigationSession, LockState};
pub use spirit_box::{assess_tuning, check_spirit_box_lock, TuningAssessment, TuningProximity};
