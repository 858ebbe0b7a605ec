//! Core robot types and configuration.
//!
//! This module defines the main types and constants of the biped, including:
//! - [`actuator`]: the `pos` seam and its servo binding.
//! - [`commands`]: Command types for the tutorial console.
//! - [`config`]: Physical, calibration and gait constants for the robot.
//! - [`leg`]: Leg enumeration and indexing helpers.
//! - [`joint`]: Joint enumeration and display helpers.
//! - [`servo`]: Hobby servo driven through a PWM channel.
//!
//! These types are used throughout the firmware for kinematics, configuration, and control.
pub mod actuator;
pub mod commands;
pub mod config;
pub mod joint;
pub mod leg;
pub mod servo;
