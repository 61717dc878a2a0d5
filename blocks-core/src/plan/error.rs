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

//! Failure kinds raised by the A* driver.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The open set emptied before any state satisfying the goal was reached —
    /// the goal is unreachable from the start state under the stacking physics.
    #[error("no action sequence reaches the goal from this world state")]
    NoPath,

    #[error("search exceeded the state limit of {limit}")]
    SearchLimitExceeded { limit: usize },
}
