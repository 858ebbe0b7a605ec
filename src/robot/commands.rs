//! Command types for the tutorial console.
//!
//! Defines [`TutorialCommand`], parsed from the lines typed on the TCP console and
//! applied to the session by the tutorial task.
use super::config::DEFAULT_STEP_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TutorialCommand {
    Init(f32),
    Current,
    Execute,
    Advance,
    Reset,
    State,
    CloseConnection,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseCommandError;

impl TryFrom<&str> for TutorialCommand {
    type Error = ParseCommandError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut tokens = value.split_whitespace();

        let cmd = tokens.next().ok_or(ParseCommandError)?;
        let step_length = tokens
            .next()
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|length| length.is_finite())
            .unwrap_or(DEFAULT_STEP_LENGTH);

        match cmd {
            "i" | "init" => Ok(TutorialCommand::Init(step_length)),
            "c" | "current" => Ok(TutorialCommand::Current),
            "e" | "exec" => Ok(TutorialCommand::Execute),
            "n" | "next" => Ok(TutorialCommand::Advance),
            "r" | "reset" => Ok(TutorialCommand::Reset),
            "st" | "state" => Ok(TutorialCommand::State),
            "q" | "quit" => Ok(TutorialCommand::CloseConnection),
            _ => Err(ParseCommandError),
        }
    }
}
