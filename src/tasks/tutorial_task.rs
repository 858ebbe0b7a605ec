//! Tutorial task: owns the session and drives the leg servos.
//!
//! Configures the LEDC peripheral for six 50 Hz servo channels, then applies every
//! [`TutorialCommand`](crate::robot::commands::TutorialCommand) received from the network
//! task and sends back the rendered reply.
extern crate alloc;

use alloc::boxed::Box;
use embassy_time::Timer;
use esp_hal::gpio::AnyPin;
use esp_hal::ledc::channel::{self, Channel, ChannelIFace, Number};
use esp_hal::ledc::timer::{self, LSClockSource, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::peripherals::LEDC;
use esp_hal::time::Rate;
use fugit::HertzU32;
use log::{error, info};

use super::{TUTORIAL_COMMANDS, TUTORIAL_REPLIES};
use crate::robot::actuator::ServoLegs;
use crate::robot::config::{RobotConfig, DEFAULT_STEP_LENGTH};
use crate::robot::joint::Joint;
use crate::robot::leg::Leg;
use crate::robot::servo::{Servo, SERVO_FREQUENCY_HZ};
use crate::tutorial::{console, TutorialSession};

type LegServo = Servo<Channel<'static, LowSpeed>>;

pub async fn create_configure_timer(ledc: &mut Ledc<'static>) -> timer::Timer<'static, LowSpeed> {
    let mut timer_low = ledc.timer::<LowSpeed>(timer::Number::Timer0);
    Timer::after_millis(500).await;

    // 12 bits keep one duty step well under a degree at 50 Hz
    timer_low
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty12Bit,
            clock_source: LSClockSource::APBClk,
            frequency: Rate::from_hz(SERVO_FREQUENCY_HZ),
        })
        .expect("Fail creating ledc timer");

    timer_low
}

/// Servos indexed `[leg][joint]`: left pins first, each leg as [hip, knee, ankle].
async fn create_servos(servo_pins: [AnyPin<'static>; 6], ledc: LEDC<'static>) -> [[LegServo; 3]; 2] {
    let mut ledc = Ledc::new(ledc);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

    //Configure timer: Leak it to get static lifetime.
    let timer_low: &'static timer::Timer<'static, LowSpeed> =
        Box::leak(Box::new(create_configure_timer(&mut ledc).await));
    let [p0, p1, p2, p3, p4, p5] = servo_pins;

    let mut channels: [Channel<'static, LowSpeed>; 6] = [
        ledc.channel(Number::Channel0, p0),
        ledc.channel(Number::Channel1, p1),
        ledc.channel(Number::Channel2, p2),
        ledc.channel(Number::Channel3, p3),
        ledc.channel(Number::Channel4, p4),
        ledc.channel(Number::Channel5, p5),
    ];
    for channel in channels.iter_mut() {
        channel
            .configure(channel::config::Config {
                timer: timer_low,
                duty_pct: 7,
                pin_config: channel::config::PinConfig::PushPull,
            })
            .expect("Fail configurating low speed channels");
    }

    let servo = |pwm, leg, joint| Servo::new(pwm, HertzU32::from_raw(SERVO_FREQUENCY_HZ), leg, joint);
    let [c0, c1, c2, c3, c4, c5] = channels;
    [
        [
            servo(c0, Leg::Left, Joint::Hip),
            servo(c1, Leg::Left, Joint::Knee),
            servo(c2, Leg::Left, Joint::Ankle),
        ],
        [
            servo(c3, Leg::Right, Joint::Hip),
            servo(c4, Leg::Right, Joint::Knee),
            servo(c5, Leg::Right, Joint::Ankle),
        ],
    ]
}

#[embassy_executor::task]
pub async fn tutorial_task(servo_pins: [AnyPin<'static>; 6], ledc: LEDC<'static>) {
    info!("Starting tutorial task");
    let config = RobotConfig::new();

    // without a session the task keeps answering so that clients are never left waiting
    let mut session = match config.validate() {
        Err(e) => {
            error!("[TUTORIAL_TASK] invalid robot config: {e}");
            Err(console::unavailable(&e))
        }
        Ok(()) => TutorialSession::new(config, DEFAULT_STEP_LENGTH).map_err(|e| {
            error!("[TUTORIAL_TASK] cannot plan the default stride: {e}");
            console::unavailable(&e)
        }),
    };

    let mut legs = ServoLegs::new(create_servos(servo_pins, ledc).await, config);
    loop {
        let cmd = TUTORIAL_COMMANDS.receive().await;
        info!("[TUTORIAL_TASK] received {cmd:?}");
        let reply = match session.as_mut() {
            Ok(session) => console::apply(session, cmd, &mut legs),
            Err(reply) => reply.clone(),
        };
        TUTORIAL_REPLIES.send(reply).await;
    }
}
