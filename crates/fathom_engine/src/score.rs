//! Verification scores.
//!
//! Verify rules rate how logical a candidate action is; the
//! disambiguator compares candidates by these ratings and anything
//! under [`REASONABLE`] refuses to run, showing its reason instead.

use std::fmt;
use std::rc::Rc;

use fathom_foundation::Result;
use fathom_world::World;

/// Completely natural.
pub const VERY_LOGICAL: i32 = 150;
/// The ordinary passing score.
pub const LOGICAL: i32 = 100;
/// Acceptable, but loses ties against fully logical readings.
pub const NON_OBVIOUS: i32 = 99;
/// The lowest score that still runs.
pub const BARELY_LOGICAL: i32 = 90;
/// Pointless because it is already done.
pub const ILLOGICAL_ALREADY: i32 = 60;
/// Out of reach.
pub const ILLOGICAL_INACCESSIBLE: i32 = 20;
/// Makes no sense.
pub const ILLOGICAL: i32 = 10;
/// Refers to something the actor cannot even see.
pub const ILLOGICAL_NOT_VISIBLE: i32 = 0;

/// The cutoff: a parse scoring at least this is reasonable.
pub const REASONABLE: i32 = BARELY_LOGICAL;

/// Why a verdict failed, shown to the player on refusal.
#[derive(Clone)]
pub enum Reason {
    /// A prose template.
    Text(String),
    /// A closure that writes the refusal itself.
    Write(Rc<dyn Fn(&mut World) -> Result<()>>),
}

impl Reason {
    /// Renders the reason into the world's sink.
    ///
    /// # Errors
    ///
    /// Propagates template and rule faults.
    pub fn show(&self, world: &mut World) -> Result<()> {
        match self {
            Self::Text(template) => world.write(template),
            Self::Write(f) => f(world),
        }
    }
}

impl fmt::Debug for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => write!(f, "Reason({t:?})"),
            Self::Write(_) => write!(f, "Reason(<closure>)"),
        }
    }
}

impl From<&str> for Reason {
    fn from(template: &str) -> Self {
        Self::Text(template.to_string())
    }
}

impl From<String> for Reason {
    fn from(template: String) -> Self {
        Self::Text(template)
    }
}

/// A verify rule's rating of an action, with the reason to show when it
/// loses.
#[derive(Clone, Debug)]
pub struct Verdict {
    /// The logic score.
    pub score: i32,
    /// Shown to the player when this verdict blocks the action.
    pub reason: Option<Reason>,
}

impl Verdict {
    /// A verdict with a score and a reason.
    pub fn new(score: i32, reason: impl Into<Reason>) -> Self {
        Self {
            score,
            reason: Some(reason.into()),
        }
    }

    /// The ordinary passing verdict.
    #[must_use]
    pub const fn logical() -> Self {
        Self {
            score: LOGICAL,
            reason: None,
        }
    }

    /// A verdict that dominates every ordinary reading.
    #[must_use]
    pub const fn very_logical() -> Self {
        Self {
            score: VERY_LOGICAL,
            reason: None,
        }
    }

    /// True if the action may run.
    #[must_use]
    pub const fn is_reasonable(&self) -> bool {
        self.score >= REASONABLE
    }

    /// Combines two verdicts: when both are reasonable the higher
    /// wins; otherwise the worst reason wins.
    #[must_use]
    pub fn combine(a: Self, b: Self) -> Self {
        if a.is_reasonable() && b.is_reasonable() {
            if b.score > a.score { b } else { a }
        } else if b.score < a.score {
            b
        } else {
            a
        }
    }
}
