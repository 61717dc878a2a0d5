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

//! The crate's unified public error type: every subsystem failure folded into one
//! enum so a caller driving `interpret` then `plan` can match a single type.

use thiserror::Error;

use crate::interpret::{AggregateError, InterpretError};
use crate::plan::PlanError;
use crate::world::WorldError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Interpret(#[from] InterpretError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}
