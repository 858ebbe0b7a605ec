//! Step-by-step walkthrough of a forward stride.
//!
//! - [`step`] plans the eight servo writes of one stride and solves them up front.
//! - [`session`] walks through them: execute, advance, reset.
//! - [`console`] turns console commands into replies for the TCP client.
pub mod console;
pub mod session;
pub mod step;

pub use session::{TutorialSession, TutorialStage, TutorialState};
pub use step::{plan_step_forward, TutorialStep};
