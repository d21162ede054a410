//! Compass directions and their aliases.

use std::fmt;
use std::str::FromStr;

use fathom_foundation::{Error, Value};

/// A travel direction: the eight compass points plus up, down, in, out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
    Up,
    Down,
    In,
    Out,
}

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 12] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::Northeast,
        Self::Northwest,
        Self::Southeast,
        Self::Southwest,
        Self::Up,
        Self::Down,
        Self::In,
        Self::Out,
    ];

    /// The opposite direction; going there and back again.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Northeast => Self::Southwest,
            Self::Northwest => Self::Southeast,
            Self::Southeast => Self::Northwest,
            Self::Southwest => Self::Northeast,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }

    /// The full lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Northeast => "northeast",
            Self::Northwest => "northwest",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
            Self::Up => "up",
            Self::Down => "down",
            Self::In => "in",
            Self::Out => "out",
        }
    }

    /// Every word that names this direction, full name first.
    #[must_use]
    pub const fn words(self) -> &'static [&'static str] {
        match self {
            Self::North => &["north", "n"],
            Self::South => &["south", "s"],
            Self::East => &["east", "e"],
            Self::West => &["west", "w"],
            Self::Northeast => &["northeast", "ne"],
            Self::Northwest => &["northwest", "nw"],
            Self::Southeast => &["southeast", "se"],
            Self::Southwest => &["southwest", "sw"],
            Self::Up => &["up", "u"],
            Self::Down => &["down", "d"],
            Self::In => &["in", "inside"],
            Self::Out => &["out", "outside"],
        }
    }

    /// Parses a direction word or alias.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.words().contains(&word))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::internal(format!("not a direction: {s}")))
    }
}

impl From<Direction> for Value {
    fn from(dir: Direction) -> Self {
        Value::from(dir.name())
    }
}
