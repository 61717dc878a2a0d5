// This file is part of the Blocks World project.

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The passive data side of the domain: object catalogue, stack layout and arm state.
//!
//! Nothing in this module performs I/O or owns a notion of time; it is pure data plus
//! the small amount of validation needed to keep a [`WorldState`] well-formed.

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "scenario")]
use serde::{Deserialize, Serialize};

/// An opaque identifier drawn from the catalogue, plus the reserved literal `"floor"`.
pub type ObjectId = String;

/// The reserved identifier used to mean "resting directly on the table", never present
/// in a catalogue and never held by the arm.
pub const FLOOR: &str = "floor";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "scenario", serde(rename_all = "lowercase"))]
pub enum Form {
    Brick,
    Plank,
    Ball,
    Pyramid,
    Box,
    Table,
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Form::Brick => "brick",
            Form::Plank => "plank",
            Form::Ball => "ball",
            Form::Pyramid => "pyramid",
            Form::Box => "box",
            Form::Table => "table",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "scenario", serde(rename_all = "lowercase"))]
pub enum Size {
    Small,
    Large,
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Size::Small => "small",
            Size::Large => "large",
        };
        write!(f, "{}", s)
    }
}

/// An immutable record describing one catalogue entry.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
pub struct ObjectDef {
    pub form: Form,
    pub size: Size,
    pub color: String,
}

/// Mapping from identifier to its immutable definition.
pub type Catalogue = HashMap<ObjectId, ObjectDef>;

/// Either an identifier is being held by the arm, or the arm is empty.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
pub enum Holding {
    Empty,
    Object(ObjectId),
}

impl Holding {
    pub fn as_object(&self) -> Option<&ObjectId> {
        match self {
            Holding::Object(id) => Some(id),
            Holding::Empty => None,
        }
    }
}

/// The mutable state of the tabletop scene: stacks of blocks, arm position, what (if
/// anything) the arm is holding, plus the immutable catalogue of object definitions.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
pub struct WorldState {
    pub objects: Catalogue,
    /// `stacks[i][0]` is the bottom of column `i`; `stacks[i].last()` is the top.
    pub stacks: Vec<Vec<ObjectId>>,
    pub holding: Holding,
    pub arm: usize,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("arm column {arm} is out of range for {columns} columns")]
    ArmOutOfRange { arm: usize, columns: usize },
    #[error("identifier {0:?} appears more than once across stacks and holding")]
    DuplicateIdentifier(ObjectId),
    #[error("identifier {0:?} is not present in the catalogue")]
    UnknownIdentifier(ObjectId),
}

impl WorldState {
    /// Checks the invariants from the data model: every identifier appears exactly
    /// once across `stacks ∪ holding`, `arm` is in range, and every identifier that
    /// appears has a catalogue entry.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.arm >= self.stacks.len() {
            return Err(WorldError::ArmOutOfRange {
                arm: self.arm,
                columns: self.stacks.len(),
            });
        }
        let mut seen = std::collections::HashSet::new();
        for column in &self.stacks {
            for id in column {
                if !self.objects.contains_key(id) {
                    return Err(WorldError::UnknownIdentifier(id.clone()));
                }
                if !seen.insert(id.clone()) {
                    return Err(WorldError::DuplicateIdentifier(id.clone()));
                }
            }
        }
        if let Holding::Object(id) = &self.holding {
            if !self.objects.contains_key(id) {
                return Err(WorldError::UnknownIdentifier(id.clone()));
            }
            if !seen.insert(id.clone()) {
                return Err(WorldError::DuplicateIdentifier(id.clone()));
            }
        }
        Ok(())
    }

    pub fn columns(&self) -> usize {
        self.stacks.len()
    }

    pub fn def(&self, id: &str) -> Option<&ObjectDef> {
        self.objects.get(id)
    }

    /// Every identifier known to this world, including the floor.
    pub fn all_ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.objects.keys()
    }
}
