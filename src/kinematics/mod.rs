//! Leg-plane inverse kinematics for the biped.
//!
//! - [`conversion`] solves a foot target into hip/knee/ankle angles and maps them to servo
//!   commands with the per-leg mounting convention.
//! - [`explanation`] renders the Spanish walkthrough of a solution shown by the tutorial.
//!
//! Used by the tutorial sequencer and by the servo binding of [`crate::robot::actuator`].
use core::fmt::{self, Display, Formatter};

pub mod conversion;
pub mod explanation;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KinematicsError {
    /// The target is out of reach of the two links (or `z` is not a positive height).
    UnreachableTarget { x: f32, z: f32 },
    /// The explanation text did not fit its fixed buffer.
    ExplanationOverflow,
}

impl Display for KinematicsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::UnreachableTarget { x, z } => {
                write!(f, "target x={x} z={z} is unreachable")
            }
            KinematicsError::ExplanationOverflow => f.write_str("explanation buffer overflow"),
        }
    }
}

impl core::error::Error for KinematicsError {}
