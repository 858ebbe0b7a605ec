//! Joints of one leg.
//!
//! Defines the [`Joint`] enum for identifying each joint of a leg (hip, knee, ankle),
//! and provides display formatting for debugging and logging.
use core::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    Hip = 0,
    Knee = 1,
    Ankle = 2,
}

impl Display for Joint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Joint::Hip => f.write_str("hip"),
            Joint::Knee => f.write_str("knee"),
            Joint::Ankle => f.write_str("ankle"),
        }
    }
}
