//! The Fathom action engine.
//!
//! One turn flows through here: the parser's candidate actions are
//! verified and disambiguated, the winner runs through the five-phase
//! pipeline (verify → try_before → before → carry_out → report), and
//! the turn hooks reposition backdrops and re-render the scene when it
//! changed. The standard verb library lives here too; game content
//! layers its own verbs and rules on top through the same [`Game`]
//! registration API.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod adorn;
pub mod describe;
pub mod disambig;
pub mod game;
pub mod pipeline;
pub mod score;
pub mod turn;
pub mod verbs;

pub use game::{Game, Menu};
pub use score::{Reason, Verdict};
