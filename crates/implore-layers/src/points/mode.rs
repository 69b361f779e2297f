//! Interaction mode, marker symbol and blending of a point layer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Interaction mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Camera interaction; the layer does not consume mouse events
    #[default]
    PanZoom,
    /// Clicking adds points
    Add,
    /// Clicking selects and drags points
    Select,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::PanZoom => "pan_zoom",
            Mode::Add => "add",
            Mode::Select => "select",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pan_zoom" => Ok(Mode::PanZoom),
            "add" => Ok(Mode::Add),
            "select" => Ok(Mode::Select),
            other => Err(ValueError::UnknownMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// Marker symbol
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Arrow,
    Clobber,
    Cross,
    Diamond,
    #[default]
    Disc,
    Hbar,
    Ring,
    Square,
    Star,
    TailedArrow,
    TriangleDown,
    TriangleUp,
    Vbar,
    X,
}

impl Symbol {
    pub const ALL: [Symbol; 14] = [
        Symbol::Arrow,
        Symbol::Clobber,
        Symbol::Cross,
        Symbol::Diamond,
        Symbol::Disc,
        Symbol::Hbar,
        Symbol::Ring,
        Symbol::Square,
        Symbol::Star,
        Symbol::TailedArrow,
        Symbol::TriangleDown,
        Symbol::TriangleUp,
        Symbol::Vbar,
        Symbol::X,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Arrow => "arrow",
            Symbol::Clobber => "clobber",
            Symbol::Cross => "cross",
            Symbol::Diamond => "diamond",
            Symbol::Disc => "disc",
            Symbol::Hbar => "hbar",
            Symbol::Ring => "ring",
            Symbol::Square => "square",
            Symbol::Star => "star",
            Symbol::TailedArrow => "tailed_arrow",
            Symbol::TriangleDown => "triangle_down",
            Symbol::TriangleUp => "triangle_up",
            Symbol::Vbar => "vbar",
            Symbol::X => "x",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbol {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Symbol::ALL
            .iter()
            .copied()
            .find(|symbol| symbol.name() == lower)
            .ok_or_else(|| ValueError::UnknownSymbol {
                symbol: s.to_string(),
            })
    }
}

/// How the layer is composited with the layers below it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Blending {
    Opaque,
    #[default]
    Translucent,
    Additive,
}

impl Blending {
    pub fn name(&self) -> &'static str {
        match self {
            Blending::Opaque => "opaque",
            Blending::Translucent => "translucent",
            Blending::Additive => "additive",
        }
    }
}

impl fmt::Display for Blending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Blending {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opaque" => Ok(Blending::Opaque),
            "translucent" => Ok(Blending::Translucent),
            "additive" => Ok(Blending::Additive),
            other => Err(ValueError::UnknownBlending {
                blending: other.to_string(),
            }),
        }
    }
}
