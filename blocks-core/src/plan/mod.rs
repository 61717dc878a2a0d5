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

//! The planner: successor generation over the stacking physics, an admissible
//! heuristic, and a generic A* driver that ties them into one `plan()` call.

mod astar;
mod error;
mod heuristic;

pub use error::PlanError;

use crate::goal::Goal;
use crate::physics;
use crate::world::{Holding, WorldState};

/// One of the four primitive arm actions, tokenised for the plan-output contract.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    L,
    R,
    P,
    D,
}

impl Action {
    pub fn token(self) -> &'static str {
        match self {
            Action::L => "l",
            Action::R => "r",
            Action::P => "p",
            Action::D => "d",
        }
    }

    /// L↔R and P↔D pairs, used to prune the immediate backtrack.
    fn inverse(self) -> Action {
        match self {
            Action::L => Action::R,
            Action::R => Action::L,
            Action::P => Action::D,
            Action::D => Action::P,
        }
    }
}

/// Legal successors of `world`, excluding whichever action would immediately undo
/// `prev`. Each successor carries the human-readable message the emitted plan quotes
/// alongside its action token.
fn successors(world: &WorldState, prev: Option<Action>) -> Vec<(Action, WorldState, String)> {
    let mut out = Vec::with_capacity(4);
    let forbidden = prev.map(Action::inverse);
    let columns = world.columns();

    if world.arm > 0 && forbidden != Some(Action::L) {
        let mut next = world.clone();
        next.arm -= 1;
        out.push((Action::L, next, "Moving left".to_owned()));
    }
    if world.arm + 1 < columns && forbidden != Some(Action::R) {
        let mut next = world.clone();
        next.arm += 1;
        out.push((Action::R, next, "Moving right".to_owned()));
    }
    if matches!(world.holding, Holding::Empty)
        && !world.stacks[world.arm].is_empty()
        && forbidden != Some(Action::P)
    {
        let mut next = world.clone();
        let id = next.stacks[next.arm].pop().expect("checked non-empty above");
        let form = world.def(&id).map(|d| d.form.to_string()).unwrap_or_default();
        next.holding = Holding::Object(id);
        out.push((Action::P, next, format!("Picking up the {}", form)));
    }
    if let Holding::Object(id) = &world.holding {
        if forbidden != Some(Action::D) {
            let top = world.stacks[world.arm].last().map(String::as_str);
            if physics::can_rest_on_floor_or(world, id, top) {
                let mut next = world.clone();
                let id = id.clone();
                let form = world.def(&id).map(|d| d.form.to_string()).unwrap_or_default();
                next.stacks[next.arm].push(id);
                next.holding = Holding::Empty;
                out.push((Action::D, next, format!("Dropping the {}", form)));
            }
        }
    }
    out
}

/// Finds a shortest legal action sequence from `world` to a state satisfying `goal`,
/// returned as the interleaved `msg, cmd, msg, cmd, ...` stream.
pub fn plan(world: &WorldState, goal: &Goal) -> Result<Vec<String>, PlanError> {
    astar::search(world.clone(), goal)
}
