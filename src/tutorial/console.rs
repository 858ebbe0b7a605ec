//! Replies of the tutorial console.
//!
//! [`apply`] runs one [`TutorialCommand`] against a session and renders what the client
//! sees: the step line, the explanation of its angles, or the progress of the stride.
use core::fmt::{self, Write};
use heapless::String;
use log::warn;

use super::session::TutorialSession;
use crate::robot::{actuator::Actuator, commands::TutorialCommand};

pub const REPLY_CAPACITY: usize = 2048;

pub type Reply = String<REPLY_CAPACITY>;

fn write_current<W: Write>(out: &mut W, session: &TutorialSession) -> fmt::Result {
    match session.current_step() {
        Some(step) => {
            writeln!(out, "{step}")?;
            writeln!(out, "{}", step.angles.explanation)
        }
        None => writeln!(out, "Tutorial completo. Usa 'reset' o 'init'."),
    }
}

fn write_reply<W: Write, A: Actuator + ?Sized>(
    out: &mut W,
    session: &mut TutorialSession,
    command: TutorialCommand,
    actuator: &mut A,
) -> fmt::Result {
    match command {
        TutorialCommand::Init(step_length) => match session.init_step_forward(step_length) {
            Ok(()) => {
                writeln!(out, "{}", session.state())?;
                write_current(out, session)
            }
            Err(e) => writeln!(out, "Error: {e}"),
        },
        TutorialCommand::Current => write_current(out, session),
        TutorialCommand::Execute => {
            if session.execute_current_step(actuator) {
                match session.current_step() {
                    Some(step) => writeln!(out, "Ejecutado: {step}"),
                    None => Ok(()),
                }
            } else {
                writeln!(out, "No hay escritura pendiente.")
            }
        }
        TutorialCommand::Advance => {
            if session.advance() {
                write_current(out, session)
            } else {
                writeln!(out, "Tutorial completo. Usa 'reset' o 'init'.")
            }
        }
        TutorialCommand::Reset => {
            session.reset();
            writeln!(out, "{}", session.state())
        }
        TutorialCommand::State => {
            writeln!(out, "{}", session.state())?;
            for (index, step) in session.state().steps().iter().enumerate() {
                let marker = if index == session.state().current_write_index() {
                    '>'
                } else {
                    ' '
                };
                writeln!(out, "{marker} {step}")?;
            }
            Ok(())
        }
        TutorialCommand::CloseConnection => Ok(()),
    }
}

/// Applies `command` to `session` and renders the reply.
///
/// A reply that does not fit [`REPLY_CAPACITY`] is cut at the last line that did.
pub fn apply<A: Actuator + ?Sized>(
    session: &mut TutorialSession,
    command: TutorialCommand,
    actuator: &mut A,
) -> Reply {
    let mut reply = Reply::new();
    if write_reply(&mut reply, session, command, actuator).is_err() {
        warn!("[TUTORIAL] reply to {command:?} truncated");
    }
    reply
}

/// Reply sent for every command when no session could be set up.
pub fn unavailable(reason: &dyn fmt::Display) -> Reply {
    let mut reply = Reply::new();
    if writeln!(reply, "Tutorial no disponible: {reason}").is_err() {
        warn!("[TUTORIAL] unavailable reply truncated");
    }
    reply
}
