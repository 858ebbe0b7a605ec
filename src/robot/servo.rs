use crate::robot::{joint::Joint, leg::Leg};
use fugit::Hertz;
use log::error;

use embedded_hal::pwm::SetDutyCycle;

// Convert angle (0–180) to pulse width (544–2400 us)
pub const SERVO_MIN_PULSE_US: u32 = 544;
pub const SERVO_MAX_PULSE_US: u32 = 2400;
pub const SERVO_ANGLE_RANGE: u32 = 180;
pub const SERVO_FREQUENCY_HZ: u32 = 50;

#[derive(Debug)]
pub struct Servo<PWM> {
    pwm: PWM,
    angle: Option<u8>,
    max_duty: u32,
    frequency: Hertz<u32>,
    leg_id: Leg,
    joint_id: Joint,
}

impl<PWM> Servo<PWM>
where
    PWM: SetDutyCycle,
{
    pub fn new(pwm: PWM, frequency: Hertz<u32>, leg_id: Leg, joint_id: Joint) -> Self {
        let max_duty = pwm.max_duty_cycle() as u32;
        Self {
            pwm,
            angle: None,
            max_duty,
            frequency,
            leg_id,
            joint_id,
        }
    }

    /// Sets the servo angle in degrees.
    ///
    /// # Arguments
    /// * `angle` - A value between 0 and 180 degrees. Values outside this range are clamped.
    ///
    /// PWM driver failures are logged, the last commanded angle is kept either way.
    pub fn set_angle(&mut self, angle: u8) {
        let angle = angle.min(SERVO_ANGLE_RANGE as u8);

        //Avoid setting the same angle again
        if self.angle == Some(angle) {
            return;
        }
        self.angle = Some(angle);

        // Linearly interpolate the pulse
        let pulse = SERVO_MIN_PULSE_US
            + (angle as u32 * (SERVO_MAX_PULSE_US - SERVO_MIN_PULSE_US)) / SERVO_ANGLE_RANGE;
        // e.g.: 90° -> 1472 µs

        // Scale pulse to PWM register resolution
        // THE WIDTH OF THE PULSE DRIVES THE ANGLE, NOT FREQ
        let period_us = 1_000_000 / self.frequency.raw();
        let duty = ((pulse * self.max_duty) / period_us).min(self.max_duty) as u16;
        if let Err(e) = self.pwm.set_duty_cycle(duty) {
            error!(
                "{} {} Error writing angle {:?}",
                self.leg_id, self.joint_id, e
            );
        }
    }

    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;
    use fugit::HertzU32;

    /// Duty register that records every write; with `max == 20000` one tick is one µs at 50 Hz.
    #[derive(Debug, Default)]
    pub(crate) struct MockPwm {
        pub max: u16,
        pub writes: std::vec::Vec<u16>,
    }

    impl MockPwm {
        pub(crate) fn microseconds() -> Self {
            Self {
                max: 20_000,
                writes: std::vec::Vec::new(),
            }
        }
    }

    impl ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.writes.push(duty);
            Ok(())
        }
    }

    fn servo() -> Servo<MockPwm> {
        Servo::new(
            MockPwm::microseconds(),
            HertzU32::from_raw(SERVO_FREQUENCY_HZ),
            Leg::Left,
            Joint::Knee,
        )
    }

    #[test]
    fn maps_angle_to_pulse_width() {
        let mut servo = servo();
        servo.set_angle(0);
        servo.set_angle(90);
        servo.set_angle(180);
        assert_eq!(servo.pwm.writes, [544, 1472, 2400]);
        assert_eq!(servo.angle(), Some(180));
    }

    #[test]
    fn first_write_happens_even_at_zero() {
        let mut servo = servo();
        assert_eq!(servo.angle(), None);
        servo.set_angle(0);
        assert_eq!(servo.pwm.writes.len(), 1);
    }

    #[test]
    fn clamps_and_skips_redundant_writes() {
        let mut servo = servo();
        servo.set_angle(180);
        servo.set_angle(250);
        servo.set_angle(180);
        assert_eq!(servo.pwm.writes, [2400]);
    }

    #[test]
    fn scales_to_register_resolution() {
        let mut servo = Servo::new(
            MockPwm {
                max: 255,
                writes: std::vec::Vec::new(),
            },
            HertzU32::from_raw(SERVO_FREQUENCY_HZ),
            Leg::Right,
            Joint::Hip,
        );
        servo.set_angle(90);
        // 1472 * 255 / 20000
        assert_eq!(servo.pwm.writes, [18]);
        assert_eq!(servo.leg_id, Leg::Right);
    }
}
