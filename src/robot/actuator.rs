//! The `pos` seam between the tutorial and the servos.
use embedded_hal::pwm::SetDutyCycle;
use log::{debug, error};

use crate::kinematics::conversion::{calculate_angles, f32_to_u8, servo_degrees};
use crate::robot::{config::RobotConfig, joint::Joint, leg::Leg, servo::Servo};

/// Moves a foot to a target of its leg plane.
pub trait Actuator {
    fn pos(&mut self, x: f32, z: f32, leg: Leg);
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    fn pos(&mut self, x: f32, z: f32, leg: Leg) {
        (**self).pos(x, z, leg)
    }
}

/// Hip, knee and ankle servos of both legs, indexed `[leg][joint]`.
pub struct ServoLegs<PWM> {
    servos: [[Servo<PWM>; 3]; 2],
    config: RobotConfig,
}

impl<PWM> ServoLegs<PWM>
where
    PWM: SetDutyCycle,
{
    pub fn new(servos: [[Servo<PWM>; 3]; 2], config: RobotConfig) -> Self {
        Self { servos, config }
    }
}

impl<PWM> Actuator for ServoLegs<PWM>
where
    PWM: SetDutyCycle,
{
    /// Unreachable targets are logged and leave the servos where they are.
    fn pos(&mut self, x: f32, z: f32, leg: Leg) {
        let angles = match calculate_angles(&self.config, x, z) {
            Ok(angles) => angles,
            Err(e) => {
                error!("[SERVO] {leg} leg: {e}");
                return;
            }
        };

        let degrees = servo_degrees(&self.config, leg, &angles);
        for (servo, angle) in self.servos[leg].iter_mut().zip(degrees) {
            servo.set_angle(f32_to_u8(angle));
        }
        let [hip, knee, ankle] = &self.servos[leg];
        debug!(
            "[SERVO] {leg} leg -> {}: {:?}, {}: {:?}, {}: {:?}",
            Joint::Hip,
            hip.angle(),
            Joint::Knee,
            knee.angle(),
            Joint::Ankle,
            ankle.angle()
        );
    }
}
