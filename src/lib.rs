//! Library root for the biped walking tutorial firmware.
//!
//! Re-exports all main modules: [`kinematics`], [`robot`], [`tutorial`] and, with the
//! `firmware` feature, [`tasks`].
//! Used by the main binary and by the host tests.
#![cfg_attr(not(test), no_std)]

pub mod kinematics;
pub mod robot;
#[cfg(feature = "firmware")]
pub mod tasks;
pub mod tutorial;

pub const TUTORIALCMD_CHANNEL_SIZE: usize = 4;
pub const REPLY_CHANNEL_SIZE: usize = 1;
