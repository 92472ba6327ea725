//! Oracle for GM-less play.
//!
//! Yes/no questions weighted by likelihood and the chaos factor, and event
//! prompts for the GM to interpret.

pub mod event;
pub mod yes_no;

pub use event::{EventFocus, OracleEvent, generate_event, roll_event_focus};
pub use yes_no::{Likelihood, OracleAnswer, OracleResult, ask};
