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

//! Generic best-first search: a binary-heap frontier plus a canonical
//! `{stacks, holding, arm}` key for the closed set, so that two distinct search nodes
//! reaching the same physical state are deduplicated on the state, not on node identity
//! (a naive node-identity check under-deduplicates: distinct search paths can arrive at
//! an equal physical state and would otherwise both be expanded).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::goal::Goal;
use crate::world::{Holding, ObjectId, WorldState};

use super::error::PlanError;
use super::heuristic::heuristic;
use super::{successors, Action};

const MAX_STATES: usize = 20_000;

type StateKey = (Vec<Vec<ObjectId>>, Holding, usize);

fn canonical_key(world: &WorldState) -> StateKey {
    (world.stacks.clone(), world.holding.clone(), world.arm)
}

struct Node {
    state: WorldState,
    parent: Option<usize>,
    action: Option<Action>,
    message: Option<String>,
    g: i64,
}

/// An open-set entry. Ordered by ascending `f`; a binary heap without decrease-key
/// support still behaves correctly here because a cheaper entry for the same node is
/// simply pushed again and the stale one is skipped once its state is already closed.
#[derive(PartialEq, Eq)]
struct Frontier {
    f: i64,
    id: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Searches for a shortest legal action sequence from `start` to a state satisfying
/// `goal`. Returns the interleaved message/token stream.
pub fn search(start: WorldState, goal: &Goal) -> Result<Vec<String>, PlanError> {
    if goal.is_satisfied(&start) {
        return Ok(Vec::new());
    }

    let start_key = canonical_key(&start);
    let start_h = heuristic(&start, goal);
    let mut nodes = vec![Node {
        state: start,
        parent: None,
        action: None,
        message: None,
        g: 0,
    }];
    let mut open = BinaryHeap::new();
    open.push(Frontier { f: start_h, id: 0 });
    let mut best_g: HashMap<StateKey, i64> = HashMap::new();
    best_g.insert(start_key, 0);
    let mut closed: HashSet<StateKey> = HashSet::new();
    let mut expanded = 0usize;

    while let Some(Frontier { id, .. }) = open.pop() {
        let key = canonical_key(&nodes[id].state);
        if closed.contains(&key) {
            continue;
        }
        closed.insert(key);
        expanded += 1;
        if expanded > MAX_STATES {
            return Err(PlanError::SearchLimitExceeded { limit: MAX_STATES });
        }

        if goal.is_satisfied(&nodes[id].state) {
            return Ok(trace(&nodes, id));
        }

        for (action, next_state, message) in successors(&nodes[id].state, nodes[id].action) {
            let next_key = canonical_key(&next_state);
            if closed.contains(&next_key) {
                continue;
            }
            let g = nodes[id].g + 1;
            let improves = best_g.get(&next_key).map_or(true, |&old| g < old);
            if improves {
                best_g.insert(next_key, g);
                let h = heuristic(&next_state, goal);
                let next_id = nodes.len();
                nodes.push(Node {
                    state: next_state,
                    parent: Some(id),
                    action: Some(action),
                    message: Some(message),
                    g,
                });
                open.push(Frontier { f: g + h, id: next_id });
            }
        }
    }

    Err(PlanError::NoPath)
}

/// Walks parent pointers from the goal node back to the start, then reverses and
/// flattens into `msg, cmd, msg, cmd, ...`.
fn trace(nodes: &[Node], mut id: usize) -> Vec<String> {
    let mut steps = Vec::new();
    while let Some(parent) = nodes[id].parent {
        steps.push((nodes[id].message.clone().expect("non-root node"), nodes[id].action.expect("non-root node")));
        id = parent;
    }
    steps.reverse();

    let mut out = Vec::with_capacity(steps.len() * 2);
    for (message, action) in steps {
        out.push(message);
        out.push(action.token().to_owned());
    }
    out
}
