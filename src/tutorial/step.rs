//! The planned foot placements of one forward stride.
use core::fmt::{self, Display, Formatter};
use heapless::Vec;

use crate::kinematics::explanation::{calculate_angles_with_explanation, AngleCalculation};
use crate::kinematics::KinematicsError;
use crate::robot::{config::RobotConfig, leg::Leg};

/// Number of servo writes in one stride.
pub const STEP_COUNT: usize = 8;
/// Writes per phase; the index at which phase 2 starts.
pub const PHASE_LENGTH: usize = 4;

pub type StepTable = Vec<TutorialStep, STEP_COUNT>;

/// Where a write puts a foot, before solving it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTarget {
    pub phase: u8,
    pub leg: Leg,
    pub write_number: u8,
    pub x: f32,
    pub z: f32,
}

impl StepTarget {
    const fn new(phase: u8, leg: Leg, write_number: u8, x: f32, z: f32) -> Self {
        Self {
            phase,
            leg,
            write_number,
            x,
            z,
        }
    }
}

/// Targets of a forward stride of `step_length`.
///
/// The swinging leg works at `step_height` while the supporting one is lowered by
/// `step_clearance`. Phase 2 swaps the legs and biases the right foot by `step_offset`.
pub fn stride_targets(config: &RobotConfig, step_length: f32) -> [StepTarget; STEP_COUNT] {
    let swing = config.step_height;
    let support = config.step_height - config.step_clearance;
    let offset = config.step_offset;

    [
        // Phase 1: left leg advancing, right leg holding
        StepTarget::new(1, Leg::Left, 1, step_length, swing),
        StepTarget::new(1, Leg::Right, 1, -step_length, support),
        StepTarget::new(1, Leg::Left, 2, -step_length, swing),
        StepTarget::new(1, Leg::Right, 2, step_length, support),
        // Phase 2: right leg advancing, left leg holding
        StepTarget::new(2, Leg::Right, 3, step_length + offset, swing),
        StepTarget::new(2, Leg::Left, 3, -step_length, support),
        StepTarget::new(2, Leg::Right, 4, -step_length + offset, swing),
        StepTarget::new(2, Leg::Left, 4, step_length, support),
    ]
}

/// One planned foot placement and its solved angles.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorialStep {
    pub phase: u8,
    pub leg: Leg,
    pub write_number: u8,
    pub x: f32,
    pub z: f32,
    pub angles: AngleCalculation,
    pub is_executed: bool,
}

impl TutorialStep {
    pub fn solve(config: &RobotConfig, target: StepTarget) -> Result<Self, KinematicsError> {
        let angles = calculate_angles_with_explanation(config, target.x, target.z, target.leg)?;
        Ok(Self {
            phase: target.phase,
            leg: target.leg,
            write_number: target.write_number,
            x: target.x,
            z: target.z,
            angles,
            is_executed: false,
        })
    }
}

impl Display for TutorialStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fase {} | pierna {} | escritura {}: X={:.2}cm, Z={:.2}cm -> Hip={:.1}°, Knee={:.1}°, Ankle={:.1}° [{}]",
            self.phase,
            self.leg.spanish_name(),
            self.write_number,
            self.x,
            self.z,
            self.angles.hip(),
            self.angles.knee(),
            self.angles.ankle(),
            if self.is_executed { "ejecutado" } else { "pendiente" }
        )
    }
}

/// Solves every write of a forward stride up front.
pub fn plan_step_forward(config: &RobotConfig, step_length: f32) -> Result<StepTable, KinematicsError> {
    stride_targets(config, step_length)
        .into_iter()
        .map(|target| TutorialStep::solve(config, target))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::conversion::calculate_angles;
    use crate::robot::config::DEFAULT_STEP_LENGTH;

    #[test]
    fn stride_table_layout() {
        let config = RobotConfig::new();
        let targets = stride_targets(&config, DEFAULT_STEP_LENGTH);

        let phases: [u8; STEP_COUNT] = targets.map(|t| t.phase);
        assert_eq!(phases, [1, 1, 1, 1, 2, 2, 2, 2]);

        let legs: [Leg; STEP_COUNT] = targets.map(|t| t.leg);
        let (l, r) = (Leg::Left, Leg::Right);
        assert_eq!(legs, [l, r, l, r, r, l, r, l]);

        let writes: [u8; STEP_COUNT] = targets.map(|t| t.write_number);
        assert_eq!(writes, [1, 1, 2, 2, 3, 3, 4, 4]);
    }

    #[test]
    fn stride_table_coordinates() {
        let config = RobotConfig::new();
        let (l, h, c, o) = (2.0, config.step_height, config.step_clearance, config.step_offset);
        let targets = stride_targets(&config, l);

        let xs: [f32; STEP_COUNT] = targets.map(|t| t.x);
        assert_eq!(xs, [l, -l, -l, l, l + o, -l, -l + o, l]);

        let zs: [f32; STEP_COUNT] = targets.map(|t| t.z);
        assert_eq!(zs, [h, h - c, h, h - c, h, h - c, h, h - c]);
    }

    #[test]
    fn plan_solves_every_target() {
        let config = RobotConfig::new();
        let plan = plan_step_forward(&config, DEFAULT_STEP_LENGTH).unwrap();
        assert_eq!(plan.len(), STEP_COUNT);

        for (step, target) in plan.iter().zip(stride_targets(&config, DEFAULT_STEP_LENGTH)) {
            assert_eq!(
                (step.phase, step.leg, step.write_number, step.x, step.z),
                (target.phase, target.leg, target.write_number, target.x, target.z)
            );
            assert!(!step.is_executed);
            assert_eq!(
                step.angles.angles,
                calculate_angles(&config, target.x, target.z).unwrap()
            );
            assert!(!step.angles.explanation.is_empty());
        }
    }

    #[test]
    fn plan_fails_on_unreachable_stride() {
        let config = RobotConfig::new();
        assert!(matches!(
            plan_step_forward(&config, 40.0),
            Err(KinematicsError::UnreachableTarget { .. })
        ));
    }

    #[test]
    fn renders_one_line() {
        let config = RobotConfig::new();
        let mut step = plan_step_forward(&config, DEFAULT_STEP_LENGTH).unwrap()[0].clone();
        let line = std::format!("{step}");
        assert!(line.starts_with("Fase 1 | pierna izquierda | escritura 1: X=2.50cm, Z=10.00cm -> Hip="));
        assert!(line.ends_with("[pendiente]"));

        step.is_executed = true;
        assert!(std::format!("{step}").ends_with("[ejecutado]"));
    }
}
