//! Asynchronous tasks of the tutorial firmware.
//!
//! This module contains Embassy async tasks for the robot's runtime, including:
//! - [`tutorial_task`]: Owns the tutorial session and the leg servos, applies console commands.
//! - [`net_task`]: Manages WiFi, TCP server, and command reception.
//!
//! Tasks are spawned from `main.rs` and communicate via Embassy channels.
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

use crate::robot::commands::TutorialCommand;
use crate::tutorial::console::Reply;
use crate::{REPLY_CHANNEL_SIZE, TUTORIALCMD_CHANNEL_SIZE};

pub mod net_task;
pub mod tutorial_task;

pub static TUTORIAL_COMMANDS: Channel<
    CriticalSectionRawMutex,
    TutorialCommand,
    TUTORIALCMD_CHANNEL_SIZE,
> = Channel::new();

pub static TUTORIAL_REPLIES: Channel<CriticalSectionRawMutex, Reply, REPLY_CHANNEL_SIZE> =
    Channel::new();
