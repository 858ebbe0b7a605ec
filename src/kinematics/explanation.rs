//! Spanish walkthrough of a kinematics solution.
//!
//! The text repeats the intermediate values of [`calculate_angles`] and the servo commands
//! they turn into, for display on the tutorial console. It has no control effect.
use core::fmt::{self, Write};
use heapless::String;

use super::conversion::{calculate_angles, plane_projection, JointAngles, ServoAngles};
use super::KinematicsError;
use crate::robot::{config::RobotConfig, leg::Leg};

pub const EXPLANATION_CAPACITY: usize = 512;

pub type Explanation = String<EXPLANATION_CAPACITY>;

/// Joint angles of a target together with their explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleCalculation {
    pub angles: JointAngles,
    pub explanation: Explanation,
}

impl AngleCalculation {
    pub fn hip(&self) -> f32 {
        self.angles.hip
    }

    pub fn knee(&self) -> f32 {
        self.angles.knee
    }

    pub fn ankle(&self) -> f32 {
        self.angles.ankle
    }
}

pub(crate) fn write_explanation<W: Write>(
    out: &mut W,
    config: &RobotConfig,
    x: f32,
    z: f32,
    leg: Leg,
    angles: &JointAngles,
) -> fmt::Result {
    let (hip_rad2, z2) = plane_projection(x, z);

    write!(out, "Posición objetivo: X={x:.2}cm, Z={z:.2}cm. ")?;
    write!(
        out,
        "Cálculo: hipRad2 = atan({x:.2}/{z:.2}) = {:.1}°. ",
        hip_rad2.to_degrees()
    )?;
    write!(out, "z2 = {z:.2}/cos(hipRad2) = {z2:.2}cm. ")?;
    write!(
        out,
        "Hip = {:.1}°, Knee = {:.1}°, Ankle = {:.1}°. ",
        angles.hip, angles.knee, angles.ankle
    )?;

    let servos = ServoAngles::for_leg(config, leg, angles);
    match leg {
        Leg::Left => {
            write!(out, "Servos Izq: Hip={}° (offset-{:.1}°), ", servos.hip, angles.hip)?;
            write!(out, "Knee={}° (offset-{:.1}°), ", servos.knee, angles.knee)?;
            write!(out, "Ankle={}° (2×offset-{:.1}°).", servos.ankle, angles.ankle)
        }
        Leg::Right => {
            write!(out, "Servos Der: Hip={}° (offset+{:.1}°), ", servos.hip, angles.hip)?;
            write!(out, "Knee={}° (offset+{:.1}°), ", servos.knee, angles.knee)?;
            write!(out, "Ankle={}° (offset+{:.1}°).", servos.ankle, angles.ankle)
        }
    }
}

pub fn generate_explanation(
    config: &RobotConfig,
    x: f32,
    z: f32,
    leg: Leg,
    angles: &JointAngles,
) -> Result<Explanation, KinematicsError> {
    let mut explanation = Explanation::new();
    write_explanation(&mut explanation, config, x, z, leg, angles)
        .map_err(|_| KinematicsError::ExplanationOverflow)?;
    Ok(explanation)
}

pub fn calculate_angles_with_explanation(
    config: &RobotConfig,
    x: f32,
    z: f32,
    leg: Leg,
) -> Result<AngleCalculation, KinematicsError> {
    let angles = calculate_angles(config, x, z)?;
    let explanation = generate_explanation(config, x, z, leg, &angles)?;
    Ok(AngleCalculation {
        angles,
        explanation,
    })
}
