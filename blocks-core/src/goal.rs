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

//! The goal language: positive literals combined into a mixed AND/OR tree.
//!
//! A [`Goal`] is finite, acyclic and immutable once built by the interpreter. It is
//! evaluated against a world snapshot by [`Goal::is_satisfied`], and rendered to the
//! sum-of-products text form from the external interface spec by its `Display` impl.

use std::fmt;

use itertools::Itertools;

use crate::physics::{holds, Relation};
use crate::world::{ObjectId, WorldState};

/// A single atomic relational fact. The interpreter only ever emits `polarity: true`
/// literals; `polarity` is kept for the goal language's future extension.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Literal {
    pub polarity: bool,
    pub rel: Relation,
    pub args: Vec<ObjectId>,
}

impl Literal {
    pub fn positive(rel: Relation, args: Vec<ObjectId>) -> Self {
        Literal {
            polarity: true,
            rel,
            args,
        }
    }

    pub fn holding(obj: &str) -> Self {
        Literal::positive(Relation::Holding, vec![obj.to_owned()])
    }

    pub fn is_satisfied(&self, world: &WorldState) -> bool {
        let truth = match self.rel.arity() {
            1 => holds(world, self.rel, &self.args[0], &self.args[0]),
            _ => holds(world, self.rel, &self.args[0], &self.args[1]),
        };
        truth == self.polarity
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "-")?;
        }
        write!(f, "{}(", self.rel)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// The operator labelling an internal [`Goal`] node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Op {
    And,
    Or,
}

/// A tagged-variant AND/OR tree of [`Literal`]s. Deliberately kept as a tree rather
/// than flattened to CNF/DNF: the heuristic exploits the distinction between
/// disjunction (`min` over alternatives) and conjunction (summed subcosts, shared arm
/// position) directly on this shape.
#[derive(Clone, PartialEq, Debug)]
pub enum Goal {
    Leaf(Literal),
    Node(Op, Vec<Goal>),
}

impl Goal {
    pub fn leaf(lit: Literal) -> Self {
        Goal::Leaf(lit)
    }

    /// Builds an AND/OR node, collapsing a single-child sequence down to that child so
    /// trivial quantifier resolutions (exactly one candidate) don't introduce a
    /// redundant wrapper node.
    pub fn node(op: Op, mut children: Vec<Goal>) -> Self {
        assert!(!children.is_empty(), "a Goal node must have children");
        if children.len() == 1 {
            children.pop().unwrap()
        } else {
            Goal::Node(op, children)
        }
    }

    pub fn and(children: Vec<Goal>) -> Self {
        Goal::node(Op::And, children)
    }

    pub fn or(children: Vec<Goal>) -> Self {
        Goal::node(Op::Or, children)
    }

    /// Flattens the tree into disjunctive-normal form: a list of conjunctive clauses,
    /// each a list of literals. Used by both the goal test and the heuristic, which
    /// operate per top-level disjunct.
    pub fn clauses(&self) -> Vec<Vec<Literal>> {
        match self {
            Goal::Leaf(l) => vec![vec![l.clone()]],
            Goal::Node(Op::And, children) => children
                .iter()
                .map(Goal::clauses)
                .fold(vec![Vec::new()], |acc, child_clauses| {
                    acc.into_iter()
                        .cartesian_product(child_clauses.into_iter())
                        .map(|(mut prefix, clause)| {
                            prefix.extend(clause);
                            prefix
                        })
                        .collect()
                }),
            Goal::Node(Op::Or, children) => {
                children.iter().flat_map(Goal::clauses).collect()
            }
        }
    }

    /// Whether `world` satisfies this goal: recursively evaluate leaves and combine
    /// with the node operator.
    pub fn is_satisfied(&self, world: &WorldState) -> bool {
        match self {
            Goal::Leaf(l) => l.is_satisfied(world),
            Goal::Node(Op::And, children) => children.iter().all(|c| c.is_satisfied(world)),
            Goal::Node(Op::Or, children) => children.iter().any(|c| c.is_satisfied(world)),
        }
    }
}

impl fmt::Display for Goal {
    /// The external sum-of-products rendering: `"(g1 & g2 & ... & gn)"` for
    /// AND, `"(g1 | g2 | ... | gn)"` for OR, with the last child first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Leaf(l) => write!(f, "{}", l),
            Goal::Node(op, children) => {
                let sep = match op {
                    Op::And => " & ",
                    Op::Or => " | ",
                };
                write!(f, "(")?;
                for (i, child) in children.iter().rev().enumerate() {
                    if i > 0 {
                        write!(f, "{}", sep)?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Catalogue, Holding};

    fn empty_world(columns: usize) -> WorldState {
        WorldState {
            objects: Catalogue::new(),
            stacks: vec![Vec::new(); columns],
            holding: Holding::Empty,
            arm: 0,
        }
    }

    #[test]
    fn single_child_node_collapses_to_leaf() {
        let lit = Literal::holding("e");
        let g = Goal::or(vec![Goal::leaf(lit.clone())]);
        assert_eq!(g, Goal::Leaf(lit));
    }

    #[test]
    fn display_renders_last_child_first() {
        let g = Goal::and(vec![
            Goal::leaf(Literal::holding("a")),
            Goal::leaf(Literal::holding("b")),
        ]);
        assert_eq!(g.to_string(), "(holding(b) & holding(a))");
    }

    #[test]
    fn and_of_or_expands_to_cross_product_clauses() {
        let g = Goal::and(vec![
            Goal::or(vec![
                Goal::leaf(Literal::holding("a")),
                Goal::leaf(Literal::holding("b")),
            ]),
            Goal::leaf(Literal::holding("c")),
        ]);
        let clauses = g.clauses();
        assert_eq!(clauses.len(), 2);
        for clause in &clauses {
            assert_eq!(clause.len(), 2);
        }
    }

    #[test]
    fn holding_goal_is_satisfied_once_arm_holds_object() {
        let mut world = empty_world(2);
        world.holding = Holding::Object("e".to_owned());
        let g = Goal::leaf(Literal::holding("e"));
        assert!(g.is_satisfied(&world));
        let g2 = Goal::leaf(Literal::holding("f"));
        assert!(!g2.is_satisfied(&world));
    }
}
