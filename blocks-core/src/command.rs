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

//! The input contract from the upstream tokenizer/parser: a [`Command`] tree referring
//! to world objects through quantified, possibly nested, entity descriptions.
//!
//! Nothing in this module resolves a description against a world; that is the
//! interpreter's job ([`crate::interpret`]).

#[cfg(feature = "scenario")]
use serde::{Deserialize, Serialize};

use crate::physics::Relation;

/// Binds the quantity and ambiguity policy of a noun phrase.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "scenario", serde(rename_all = "lowercase"))]
pub enum Quantifier {
    The,
    Any,
    All,
}

/// Wildcard form marker: matches any `form` value.
pub const ANY_FORM: &str = "anyform";

/// A leaf noun-phrase description: form/color/size are each optional filters.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
pub struct Description {
    pub form: String,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// The recursive noun-phrase shape: either a bare description, or a description
/// further qualified by a relative clause (`the X that is ... the Y`).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
pub enum ObjPattern {
    Leaf(Description),
    Located { obj: Box<ObjPattern>, loc: Location },
}

/// A relative clause: a spatial relation plus the entity it relates to.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
pub struct Location {
    pub rel: Relation,
    pub ent: Box<Entity>,
}

/// A quantified noun phrase.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
pub struct Entity {
    pub quant: Quantifier,
    pub obj: ObjPattern,
}

/// The parsed command proper: one of the three verbs the interpreter understands.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
pub enum Command {
    Take { ent: Entity },
    Put { loc: Location },
    Move { ent: Entity, loc: Location },
}

/// A single candidate parse as handed to the interpreter; more than one of these may
/// arrive for a syntactically ambiguous sentence, and the interpreter's job is to
/// whittle them down to the semantically valid subset.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
pub struct Parse {
    pub prs: Command,
}

impl Entity {
    pub fn leaf(quant: Quantifier, form: &str) -> Self {
        Entity {
            quant,
            obj: ObjPattern::Leaf(Description {
                form: form.to_owned(),
                color: None,
                size: None,
            }),
        }
    }
}
