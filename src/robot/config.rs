//! Physical, calibration and gait constants of the biped.
//!
//! The constants are the calibrated values of the robot; [`RobotConfig`] gathers them
//! into the read-only parameter store handed to the solver and the tutorial.
use core::fmt::{self, Display, Formatter};

// LEG SIZE (cm)
pub const LENGTH_UPPER: f32 = 6.0;
pub const LENGTH_LOWER: f32 = 6.0;

// SERVO OFFSETS (degrees), left legs are mounted mirrored
pub const HIP_L_OFFSET: f32 = 90.0;
pub const KNEE_L_OFFSET: f32 = 90.0;
pub const ANKLE_L_OFFSET: f32 = 45.0;
pub const HIP_R_OFFSET: f32 = 90.0;
pub const KNEE_R_OFFSET: f32 = 90.0;
pub const ANKLE_R_OFFSET: f32 = 90.0;

///CONST FOR MOVEMENT
pub const STEP_HEIGHT: f32 = 10.0;
pub const STEP_CLEARANCE: f32 = 1.0;
pub const STEP_OFFSET: f32 = 0.5;
pub const DEFAULT_STEP_LENGTH: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A leg link must have a strictly positive length.
    NonPositiveLink { link: &'static str, value: f32 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveLink { link, value } => {
                write!(f, "link {link} must be > 0, got {value}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Leg geometry, servo calibration and gait parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotConfig {
    pub l1: f32,
    pub l2: f32,
    pub hip_l_offset: f32,
    pub knee_l_offset: f32,
    pub ankle_l_offset: f32,
    pub hip_r_offset: f32,
    pub knee_r_offset: f32,
    pub ankle_r_offset: f32,
    pub step_height: f32,
    pub step_clearance: f32,
    pub step_offset: f32,
}

impl RobotConfig {
    pub const fn new() -> Self {
        Self {
            l1: LENGTH_UPPER,
            l2: LENGTH_LOWER,
            hip_l_offset: HIP_L_OFFSET,
            knee_l_offset: KNEE_L_OFFSET,
            ankle_l_offset: ANKLE_L_OFFSET,
            hip_r_offset: HIP_R_OFFSET,
            knee_r_offset: KNEE_R_OFFSET,
            ankle_r_offset: ANKLE_R_OFFSET,
            step_height: STEP_HEIGHT,
            step_clearance: STEP_CLEARANCE,
            step_offset: STEP_OFFSET,
        }
    }

    /// Same calibration with other link lengths.
    pub const fn with_links(mut self, l1: f32, l2: f32) -> Self {
        self.l1 = l1;
        self.l2 = l2;
        self
    }

    /// Checks the invariants the solver relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // written so that NaN fails too
        if !(self.l1 > 0.0) {
            return Err(ConfigError::NonPositiveLink {
                link: "l1",
                value: self.l1,
            });
        }
        if !(self.l2 > 0.0) {
            return Err(ConfigError::NonPositiveLink {
                link: "l2",
                value: self.l2,
            });
        }
        Ok(())
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self::new()
    }
}
