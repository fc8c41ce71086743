//! Core domain records for the farmyard
//!
//! Animals and barns reference each other through stable ids rather than
//! direct links, so the partition a rebalance works on is just flat records.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Favorite colors an animal can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Blue,
    DarkerThanBlack,
    Gold,
    Green,
    Platinum,
    Red,
    White,
}

impl Color {
    /// All colors, in declaration order
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Blue,
        Color::DarkerThanBlack,
        Color::Gold,
        Color::Green,
        Color::Platinum,
        Color::Red,
        Color::White,
    ];
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::Blue => write!(f, "blue"),
            Color::DarkerThanBlack => write!(f, "darker-than-black"),
            Color::Gold => write!(f, "gold"),
            Color::Green => write!(f, "green"),
            Color::Platinum => write!(f, "platinum"),
            Color::Red => write!(f, "red"),
            Color::White => write!(f, "white"),
        }
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "black" => Ok(Color::Black),
            "blue" => Ok(Color::Blue),
            "darker-than-black" | "darker_than_black" => Ok(Color::DarkerThanBlack),
            "gold" => Ok(Color::Gold),
            "green" => Ok(Color::Green),
            "platinum" => Ok(Color::Platinum),
            "red" => Ok(Color::Red),
            "white" => Ok(Color::White),
            _ => Err(format!("Unknown color: {s}")),
        }
    }
}

/// Stable identifier for an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimalId(Uuid);

impl AnimalId {
    pub fn new() -> Self {
        AnimalId(Uuid::new_v4())
    }
}

impl Default for AnimalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier for a barn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarnId(Uuid);

impl BarnId {
    pub fn new() -> Self {
        BarnId(Uuid::new_v4())
    }
}

impl Default for BarnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BarnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An individually tracked animal with one favorite color
///
/// The barn reference is rewritten by every rebalance; the color never
/// changes within one organize call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub name: String,
    pub favorite_color: Color,
    pub barn: Option<BarnId>,
}

impl Animal {
    pub fn new(name: impl Into<String>, favorite_color: Color) -> Self {
        Self {
            id: AnimalId::new(),
            name: name.into(),
            favorite_color,
            barn: None,
        }
    }
}

/// A bounded-capacity grouping bucket for one color
///
/// Capacity is global configuration, not stored per barn; member count is
/// derived from the animals referencing the barn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barn {
    pub id: BarnId,
    pub name: String,
    pub color: Color,
}

impl Barn {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            id: BarnId::new(),
            name: name.into(),
            color,
        }
    }

    /// Generate a barn with a randomized name suffix for the given color
    pub fn with_generated_name(color: Color) -> Self {
        let suffix: u32 = rand::random();
        Self::new(format!("{color}-barn-{suffix}"), color)
    }
}
