//! Inverse kinematics and servo angle conversion.
//!
//! Provides the two-link solver that turns a foot target of the leg plane into joint
//! angles, and the mapping of those angles onto each leg's servo frame.
use core::f32::consts::{FRAC_PI_2, PI};
use libm::{acosf, atanf, cosf, fabsf, roundf};

use super::KinematicsError;
use crate::robot::{config::RobotConfig, leg::Leg};

/// How far past `[-1, 1]` a law-of-cosines ratio may drift before the target is rejected.
pub const COSINE_TOLERANCE: f32 = 1e-5;

/// Joint angles in degrees, in the robot's servo-neutral frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAngles {
    pub hip: f32,
    pub knee: f32,
    pub ankle: f32,
}

/// Angle of the foot from the vertical leg axis and the hip-to-foot distance.
///
/// Returns `(hip_rad2, z2)`.
pub fn plane_projection(x: f32, z: f32) -> (f32, f32) {
    let hip_rad2 = atanf(x / z);
    let z2 = z / cosf(hip_rad2);
    (hip_rad2, z2)
}

/// Angle opposite to `opposite` in the triangle of sides `a`, `b`, `opposite`.
fn law_of_cosines(a: f32, b: f32, opposite: f32) -> Option<f32> {
    let ratio = (a * a + b * b - opposite * opposite) / (2.0 * a * b);
    if !ratio.is_finite() || fabsf(ratio) > 1.0 + COSINE_TOLERANCE {
        return None;
    }
    Some(acosf(ratio.clamp(-1.0, 1.0)))
}

/// Solves the foot target `(x, z)` of the leg plane into hip, knee and ankle angles.
pub fn calculate_angles(config: &RobotConfig, x: f32, z: f32) -> Result<JointAngles, KinematicsError> {
    let unreachable = KinematicsError::UnreachableTarget { x, z };
    if !(z > 0.0) || !x.is_finite() {
        return Err(unreachable);
    }
    let (l1, l2) = (config.l1, config.l2);

    let (hip_rad2, z2) = plane_projection(x, z);
    let hip_rad1 = law_of_cosines(l1, z2, l2).ok_or(unreachable)?;
    let knee_rad = PI - law_of_cosines(l1, l2, z2).ok_or(unreachable)?;
    let ankle_rad = FRAC_PI_2 + hip_rad2 - law_of_cosines(l2, z2, l1).ok_or(unreachable)?;

    Ok(JointAngles {
        hip: hip_rad1.to_degrees() + hip_rad2.to_degrees(),
        knee: knee_rad.to_degrees(),
        ankle: ankle_rad.to_degrees(),
    })
}

/// Servo commands in degrees for `leg`, before any rounding.
///
/// Left servos are mounted mirrored and count down from their offset; the left ankle
/// counts down from twice its offset.
pub fn servo_degrees(config: &RobotConfig, leg: Leg, angles: &JointAngles) -> [f32; 3] {
    match leg {
        Leg::Left => [
            config.hip_l_offset - angles.hip,
            config.knee_l_offset - angles.knee,
            2.0 * config.ankle_l_offset - angles.ankle,
        ],
        Leg::Right => [
            config.hip_r_offset + angles.hip,
            config.knee_r_offset + angles.knee,
            config.ankle_r_offset + angles.ankle,
        ],
    }
}

/// Servo commands truncated toward zero, as shown on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoAngles {
    pub hip: i32,
    pub knee: i32,
    pub ankle: i32,
}

impl ServoAngles {
    pub fn for_leg(config: &RobotConfig, leg: Leg, angles: &JointAngles) -> Self {
        let [hip, knee, ankle] = servo_degrees(config, leg, angles);
        Self {
            hip: hip as i32,
            knee: knee as i32,
            ankle: ankle as i32,
        }
    }
}

// Utility: Convert f32 to a servo angle safely
pub fn f32_to_u8(value: f32) -> u8 {
    roundf(value).clamp(0.0, 180.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn ten_ten() -> RobotConfig {
        RobotConfig::new().with_links(10.0, 10.0)
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn solves_straight_down_target() {
        let angles = calculate_angles(&ten_ten(), 0.0, 15.0).unwrap();
        assert_close(angles.hip, 41.4096);
        assert_close(angles.knee, 82.8192);
        assert_close(angles.ankle, 48.5904);
    }

    #[test]
    fn zero_offset_has_no_deviation() {
        let (hip_rad2, z2) = plane_projection(0.0, 15.0);
        assert_eq!(hip_rad2, 0.0);
        assert_eq!(z2, 15.0);

        let hip_rad1 = ((100.0f32 + 225.0 - 100.0) / 300.0).acos();
        let angles = calculate_angles(&ten_ten(), 0.0, 15.0).unwrap();
        assert_close(angles.hip, hip_rad1.to_degrees());
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let config = RobotConfig::new();
        let first = calculate_angles(&config, 2.5, 9.0).unwrap();
        let second = calculate_angles(&config, 2.5, 9.0).unwrap();
        assert_eq!(first.hip.to_bits(), second.hip.to_bits());
        assert_eq!(first.knee.to_bits(), second.knee.to_bits());
        assert_eq!(first.ankle.to_bits(), second.ankle.to_bits());
    }

    #[test]
    fn mirrored_targets_share_the_knee() {
        let config = ten_ten();
        let forward = calculate_angles(&config, 3.0, 14.0).unwrap();
        let backward = calculate_angles(&config, -3.0, 14.0).unwrap();

        let (hip_rad2, z2_forward) = plane_projection(3.0, 14.0);
        let (_, z2_backward) = plane_projection(-3.0, 14.0);
        assert_close(z2_forward, z2_backward);

        let deviation = 2.0 * hip_rad2.to_degrees();
        assert_close(forward.knee, backward.knee);
        assert_close(forward.hip - backward.hip, deviation);
        assert_close(forward.ankle - backward.ankle, deviation);
    }

    #[test]
    fn full_extension_is_reachable() {
        let angles = calculate_angles(&ten_ten(), 0.0, 20.0).unwrap();
        assert!(angles.knee.abs() < 0.5);
        assert!(angles.hip.abs() < 0.5);
        assert!(!angles.ankle.is_nan());
    }

    #[test]
    fn rejects_targets_out_of_reach() {
        assert_eq!(
            calculate_angles(&ten_ten(), 0.0, 25.0),
            Err(KinematicsError::UnreachableTarget { x: 0.0, z: 25.0 })
        );
        assert!(calculate_angles(&ten_ten(), 18.0, 12.0).is_err());
    }

    #[test]
    fn rejects_non_positive_height() {
        assert!(calculate_angles(&ten_ten(), 1.0, 0.0).is_err());
        assert!(calculate_angles(&ten_ten(), 0.0, 0.0).is_err());
        assert!(calculate_angles(&ten_ten(), 1.0, -5.0).is_err());
        assert!(calculate_angles(&ten_ten(), f32::NAN, 5.0).is_err());
    }

    #[test]
    fn left_servos_count_down_from_offsets() {
        let config = RobotConfig::new();
        let angles = JointAngles {
            hip: 40.7,
            knee: 80.2,
            ankle: 50.9,
        };
        let servos = ServoAngles::for_leg(&config, Leg::Left, &angles);
        assert_eq!(
            servos,
            ServoAngles {
                hip: 49,
                knee: 9,
                // 2 * 45 - 50.9
                ankle: 39,
            }
        );
    }

    #[test]
    fn right_servos_count_up_from_offsets() {
        let config = RobotConfig::new();
        let angles = JointAngles {
            hip: 40.7,
            knee: 80.2,
            ankle: 50.9,
        };
        let servos = ServoAngles::for_leg(&config, Leg::Right, &angles);
        assert_eq!(
            servos,
            ServoAngles {
                hip: 130,
                knee: 170,
                ankle: 140,
            }
        );
    }

    #[test]
    fn truncates_toward_zero() {
        let config = RobotConfig::new();
        let angles = JointAngles {
            hip: 95.5,
            knee: 0.0,
            ankle: 0.0,
        };
        assert_eq!(ServoAngles::for_leg(&config, Leg::Left, &angles).hip, -5);
    }

    #[test]
    fn servo_angle_is_rounded_and_clamped() {
        assert_eq!(f32_to_u8(89.6), 90);
        assert_eq!(f32_to_u8(-12.0), 0);
        assert_eq!(f32_to_u8(300.0), 180);
    }

    /// Same solution computed in f64 with std's float routines.
    fn reference(config: &RobotConfig, x: f32, z: f32) -> (f64, f64, f64) {
        let (l1, l2, x, z) = (config.l1 as f64, config.l2 as f64, x as f64, z as f64);
        let hip_rad2 = (x / z).atan();
        let z2 = z / hip_rad2.cos();
        let hip_rad1 = ((l1 * l1 + z2 * z2 - l2 * l2) / (2.0 * l1 * z2)).acos();
        let knee = std::f64::consts::PI - ((l1 * l1 + l2 * l2 - z2 * z2) / (2.0 * l1 * l2)).acos();
        let ankle = std::f64::consts::FRAC_PI_2 + hip_rad2
            - ((l2 * l2 + z2 * z2 - l1 * l1) / (2.0 * l2 * z2)).acos();
        (
            (hip_rad1 + hip_rad2).to_degrees(),
            knee.to_degrees(),
            ankle.to_degrees(),
        )
    }

    #[test]
    fn matches_double_precision_reference() {
        let config = RobotConfig::new();
        let targets = [
            (2.5, 10.0),
            (-2.5, 9.0),
            (3.0, 10.0),
            (-2.0, 10.0),
            (0.0, 11.5),
        ];
        for (x, z) in targets {
            let angles = calculate_angles(&config, x, z).unwrap();
            let (hip, knee, ankle) = reference(&config, x, z);
            assert!((angles.hip as f64 - hip).abs() < 0.01, "hip at ({x}, {z})");
            assert!((angles.knee as f64 - knee).abs() < 0.01, "knee at ({x}, {z})");
            assert!((angles.ankle as f64 - ankle).abs() < 0.01, "ankle at ({x}, {z})");
        }
    }

    #[test]
    fn default_stride_start_angles() {
        let angles = calculate_angles(&RobotConfig::new(), 2.5, 10.0).unwrap();
        assert!((angles.hip - 44.834).abs() < 0.01);
        assert!((angles.knee - 61.595).abs() < 0.01);
    }

    #[test]
    fn near_full_extension_is_reachable() {
        let angles = calculate_angles(&ten_ten(), 0.0, 19.9999).unwrap();
        assert!(angles.knee < 1.0);
    }
}
