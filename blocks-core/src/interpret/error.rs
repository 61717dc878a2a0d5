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

//! Error kinds raised while resolving a single parse, plus the aggregate failure
//! reported once every candidate parse has been tried.

use thiserror::Error;

use crate::world::ObjectId;

/// Failure resolving a single candidate parse against the world. The interpreter
/// catches [`InterpretError::ObjectAmbiguity`] at the per-parse boundary so that other
/// parses still get a chance; every other variant also just means "this parse does not
/// produce a goal", but is distinguished for the aggregate message in
/// [`AggregateError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpretError {
    #[error("no object in the world matches the description")]
    NoMatch,

    #[error("\"the\" refers to more than one candidate: {0:?}")]
    ObjectAmbiguity(Vec<ObjectId>),

    #[error("cannot hold more than one object at a time")]
    CannotHoldMany,

    #[error("the arm is not holding anything")]
    ArmEmpty,

    #[error("relation {0:?} is not supported here")]
    UnsupportedRelation(String),

    #[error("quantifier combination is not supported")]
    UnsupportedQuantifier,
}

/// The user-visible failure after every parse has been tried and none survived, or
/// more than one did.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("possibly ambiguous command: which {forms:?} do you mean?")]
    PossiblyAmbiguous { forms: Vec<String> },

    #[error("no valid interpretation of this command")]
    NoValidInterpretation,

    #[error("ambiguous command; {interpretations} interpretations — use fewer relative descriptions")]
    AmbiguousCommand { interpretations: usize },
}
