use core::fmt::{self, Display, Formatter};
use log::{debug, info, warn};

use super::step::{plan_step_forward, StepTable, TutorialStep, PHASE_LENGTH, STEP_COUNT};
use crate::kinematics::KinematicsError;
use crate::robot::{actuator::Actuator, config::RobotConfig};

/// Where the walkthrough stands, derived from the write index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialStage {
    ReadyPhase1,
    ReadyPhase2,
    Complete,
}

/// Planned stride and progress through it.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorialState {
    steps: StepTable,
    current_phase: u8,
    current_write_index: usize,
    is_complete: bool,
    step_length: f32,
}

impl TutorialState {
    fn new(steps: StepTable, step_length: f32) -> Self {
        Self {
            steps,
            current_phase: 1,
            current_write_index: 0,
            is_complete: false,
            step_length,
        }
    }

    pub fn steps(&self) -> &[TutorialStep] {
        &self.steps
    }

    pub fn current_phase(&self) -> u8 {
        self.current_phase
    }

    pub fn current_write_index(&self) -> usize {
        self.current_write_index
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Step length of the last successful plan.
    pub fn step_length(&self) -> f32 {
        self.step_length
    }

    pub fn stage(&self) -> TutorialStage {
        if self.is_complete {
            TutorialStage::Complete
        } else if self.current_phase == 1 {
            TutorialStage::ReadyPhase1
        } else {
            TutorialStage::ReadyPhase2
        }
    }
}

impl Display for TutorialState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let status = match self.stage() {
            TutorialStage::Complete => "completo",
            _ => "en curso",
        };
        write!(
            f,
            "Paso hacia adelante {:.2}cm | fase {} | escritura {}/{} | {}",
            self.step_length, self.current_phase, self.current_write_index, STEP_COUNT, status
        )
    }
}

/// Walkthrough of one forward stride, one servo write at a time.
///
/// Every write is solved when the stride is planned; executing and advancing only move the
/// index and hand the stored targets to an [`Actuator`].
#[derive(Debug, Clone)]
pub struct TutorialSession {
    config: RobotConfig,
    state: TutorialState,
}

impl TutorialSession {
    pub fn new(config: RobotConfig, step_length: f32) -> Result<Self, KinematicsError> {
        let steps = plan_step_forward(&config, step_length)?;
        info!("[TUTORIAL] stride planned with step length {step_length}");
        Ok(Self {
            config,
            state: TutorialState::new(steps, step_length),
        })
    }

    /// Plans a new stride and rewinds to its first write.
    ///
    /// If a target of the new stride is unreachable the current plan and progress are kept.
    pub fn init_step_forward(&mut self, step_length: f32) -> Result<(), KinematicsError> {
        let steps = plan_step_forward(&self.config, step_length)?;
        self.state = TutorialState::new(steps, step_length);
        info!("[TUTORIAL] stride planned with step length {step_length}");
        Ok(())
    }

    pub fn current_step(&self) -> Option<&TutorialStep> {
        if self.state.is_complete || self.state.current_write_index >= STEP_COUNT {
            return None;
        }
        self.state.steps.get(self.state.current_write_index)
    }

    fn current_step_mut(&mut self) -> Option<&mut TutorialStep> {
        if self.state.is_complete || self.state.current_write_index >= STEP_COUNT {
            return None;
        }
        self.state.steps.get_mut(self.state.current_write_index)
    }

    /// Sends the current write to `actuator`. Returns `false` once the stride is over.
    pub fn execute_current_step<A: Actuator + ?Sized>(&mut self, actuator: &mut A) -> bool {
        let Some(step) = self.current_step_mut() else {
            warn!("[TUTORIAL] no step left to execute");
            return false;
        };

        debug!(
            "[TUTORIAL] write {} of {} leg: x={} z={}",
            step.write_number, step.leg, step.x, step.z
        );
        actuator.pos(step.x, step.z, step.leg);
        step.is_executed = true;
        true
    }

    /// Moves to the next write. Returns `false` when there is none.
    pub fn advance(&mut self) -> bool {
        if self.state.is_complete {
            return false;
        }

        self.state.current_write_index += 1;
        if self.state.current_write_index >= STEP_COUNT {
            self.state.is_complete = true;
            info!("[TUTORIAL] stride completed");
            return false;
        }

        self.state.current_phase = if self.state.current_write_index < PHASE_LENGTH {
            1
        } else {
            2
        };
        debug!(
            "[TUTORIAL] now at write index {} (phase {})",
            self.state.current_write_index, self.state.current_phase
        );
        true
    }

    pub fn state(&self) -> &TutorialState {
        &self.state
    }

    /// Rewinds to the first write of the same plan.
    pub fn reset(&mut self) {
        self.state.current_phase = 1;
        self.state.current_write_index = 0;
        self.state.is_complete = false;
        for step in self.state.steps.iter_mut() {
            step.is_executed = false;
        }
        info!("[TUTORIAL] reset");
    }
}
