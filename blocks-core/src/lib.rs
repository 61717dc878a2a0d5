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

//! Interpreter and heuristic planner for a natural-language blocks-world command
//! processor: resolve a parsed [`command::Command`] against a [`world::WorldState`]
//! into a [`goal::Goal`], then find a minimal primitive action sequence that satisfies
//! it.
//!
//! The library never touches a filesystem, network, or environment variable; scenario
//! loading is the CLI's job (see the `scenario` feature and `blocks-cli`).

pub mod command;
pub mod error;
pub mod goal;
pub mod interpret;
pub mod physics;
pub mod plan;
pub mod world;

#[cfg(feature = "scenario")]
pub mod scenario;

pub use error::Error;
pub use goal::Goal;
pub use interpret::{AggregateError, Interpretation};
pub use plan::PlanError;
pub use world::WorldState;
