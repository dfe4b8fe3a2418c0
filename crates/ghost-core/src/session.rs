//! Reference investigation session: tick clock, spirit-box lock transitions,
//! question cooldown, and the evidence log the deduction step reads from.

use contracts::{
    GhostType, KnobPositions, ManifestationKind, QuestionId, SelectedWord, ThermalReading,
    TuningConfig,
};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::emf::{emf_level_with_breakpoints, observe_emf_level};
use crate::error::CoreError;
use crate::registry::{GhostProfile, GhostRegistry};
use crate::selection::{profile_responds, roll_manifestation_for_profile, select_word_for_profile};
use crate::spirit_box::{assess_tuning, TuningAssessment, TuningProximity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    Unlocked,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvidenceEntry {
    SpiritBoxLocked {
        tick: u64,
    },
    SpiritBoxLost {
        tick: u64,
    },
    SpiritBoxResponse {
        tick: u64,
        question: QuestionId,
        answer: SelectedWord,
    },
    SpiritBoxSilence {
        tick: u64,
        question: QuestionId,
    },
    EmfReading {
        tick: u64,
        distance_m: f64,
        base_level: u8,
        observed_level: u8,
    },
    Photo {
        tick: u64,
        manifestation: ManifestationKind,
    },
    Thermal {
        tick: u64,
        reading: ThermalReading,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AskOutcome {
    NotLocked,
    CoolingDown { ready_at: u64 },
    Silence,
    Answered(SelectedWord),
}

#[derive(Debug, Clone)]
pub struct InvestigationSession {
    profile: GhostProfile,
    tuning: TuningConfig,
    tick: u64,
    knobs: KnobPositions,
    proximity: TuningProximity,
    next_question_tick: u64,
    evidence: Vec<EvidenceEntry>,
}

impl InvestigationSession {
    pub fn new(
        registry: &GhostRegistry,
        ghost: GhostType,
        tuning: TuningConfig,
    ) -> Result<Self, CoreError> {
        tuning.validate().map_err(CoreError::InvalidTuning)?;
        let profile = registry.profile(ghost)?.clone();
        tuning
            .check_close_band(profile.spirit_box.tolerance)
            .map_err(CoreError::InvalidTuning)?;
        info!(%ghost, seed = tuning.seed, "investigation session started");
        Ok(Self {
            profile,
            tuning,
            tick: 0,
            knobs: KnobPositions::default(),
            proximity: TuningProximity::Searching,
            next_question_tick: 0,
            evidence: Vec::new(),
        })
    }

    pub fn active_ghost(&self) -> GhostType {
        self.profile.ghost_type
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn knobs(&self) -> KnobPositions {
        self.knobs
    }

    pub fn proximity(&self) -> TuningProximity {
        self.proximity
    }

    pub fn lock_state(&self) -> LockState {
        if self.proximity == TuningProximity::Locked {
            LockState::Locked
        } else {
            LockState::Unlocked
        }
    }

    pub fn evidence(&self) -> &[EvidenceEntry] {
        &self.evidence
    }

    pub fn advance(&mut self, ticks: u64) {
        self.tick = self.tick.saturating_add(ticks);
    }

    /// Moves both dials and records lock / loss transitions.
    pub fn set_knobs(&mut self, knob_a: f64, knob_b: f64) -> TuningAssessment {
        self.knobs = KnobPositions::clamped(knob_a, knob_b);
        let assessment = assess_tuning(
            self.knobs,
            &self.profile.spirit_box,
            self.tuning.lock_close_tolerance,
        );

        let was_locked = self.lock_state() == LockState::Locked;
        self.proximity = assessment.proximity;
        let is_locked = self.lock_state() == LockState::Locked;

        match (was_locked, is_locked) {
            (false, true) => {
                info!(tick = self.tick, ghost = %self.profile.ghost_type, "spirit box locked");
                self.evidence
                    .push(EvidenceEntry::SpiritBoxLocked { tick: self.tick });
            }
            (true, false) => {
                info!(tick = self.tick, ghost = %self.profile.ghost_type, "spirit box lock lost");
                self.evidence.push(EvidenceEntry::SpiritBoxLost { tick: self.tick });
            }
            _ => {}
        }
        assessment
    }

    pub fn ask<R>(&mut self, question: QuestionId, rng: &mut R) -> Result<AskOutcome, CoreError>
    where
        R: Rng + ?Sized,
    {
        if self.lock_state() != LockState::Locked {
            return Ok(AskOutcome::NotLocked);
        }
        if self.tick < self.next_question_tick {
            return Ok(AskOutcome::CoolingDown {
                ready_at: self.next_question_tick,
            });
        }
        self.next_question_tick = self
            .tick
            .saturating_add(self.tuning.question_cooldown_ticks);

        if !profile_responds(&self.profile, rng) {
            self.evidence.push(EvidenceEntry::SpiritBoxSilence {
                tick: self.tick,
                question,
            });
            return Ok(AskOutcome::Silence);
        }

        let answer = select_word_for_profile(&self.profile, question, rng)?;
        self.evidence.push(EvidenceEntry::SpiritBoxResponse {
            tick: self.tick,
            question,
            answer: answer.clone(),
        });
        Ok(AskOutcome::Answered(answer))
    }

    pub fn sample_emf<R>(&mut self, distance_m: f64, rng: &mut R) -> u8
    where
        R: Rng + ?Sized,
    {
        let base_level = emf_level_with_breakpoints(distance_m, &self.tuning.emf_breakpoints_m);
        let observed_level = observe_emf_level(&self.profile.emf, base_level, rng);
        debug!(tick = self.tick, distance_m, base_level, observed_level, "emf sample");
        self.evidence.push(EvidenceEntry::EmfReading {
            tick: self.tick,
            distance_m,
            base_level,
            observed_level,
        });
        observed_level
    }

    pub fn capture_photo<R>(&mut self, rng: &mut R) -> Option<ManifestationKind>
    where
        R: Rng + ?Sized,
    {
        let manifestation = roll_manifestation_for_profile(&self.profile, rng)?;
        self.evidence.push(EvidenceEntry::Photo {
            tick: self.tick,
            manifestation,
        });
        Some(manifestation)
    }

    pub fn scan_thermal(&mut self) -> ThermalReading {
        let reading = self.profile.thermal_reading;
        self.evidence.push(EvidenceEntry::Thermal {
            tick: self.tick,
            reading,
        });
        reading
    }
}
