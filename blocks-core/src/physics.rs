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

//! Pure, side-effect-free predicates over a [`WorldState`] snapshot: spatial relations
//! and the stacking-legality rule `canRestOn`. Nothing here mutates or borrows a world
//! past the call; every function takes a `&WorldState` and returns a plain value.

#[cfg(feature = "scenario")]
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::world::{Form, ObjectDef, Size, WorldState, FLOOR};

/// One of the seven spatial relations plus `holding`, the complete vocabulary a
/// [`crate::goal::Literal`] can carry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "scenario", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "scenario", serde(rename_all = "lowercase"))]
pub enum Relation {
    LeftOf,
    RightOf,
    Beside,
    Above,
    Under,
    OnTop,
    Inside,
    Holding,
}

impl Relation {
    /// Number of arguments this relation's literal takes: one for `holding`, two for
    /// every spatial relation.
    pub fn arity(self) -> usize {
        match self {
            Relation::Holding => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Relation::LeftOf => "leftof",
            Relation::RightOf => "rightof",
            Relation::Beside => "beside",
            Relation::Above => "above",
            Relation::Under => "under",
            Relation::OnTop => "ontop",
            Relation::Inside => "inside",
            Relation::Holding => "holding",
        };
        write!(f, "{}", s)
    }
}

/// `(column, height)` of an object resting in a stack. `height` is the index within
/// the column, `0` being the floor-adjacent slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub column: usize,
    pub height: usize,
}

/// Locates a stack-resident object. Returns `None` if the object is held, or is not
/// present in any stack (which includes the reserved `floor` identifier).
pub fn find(world: &WorldState, obj: &str) -> Option<Position> {
    if obj == FLOOR {
        return None;
    }
    for (column, stack) in world.stacks.iter().enumerate() {
        if let Some(height) = stack.iter().position(|id| id == obj) {
            return Some(Position { column, height });
        }
    }
    None
}

fn is_held(world: &WorldState, obj: &str) -> bool {
    world.holding.as_object().map(|h| h.as_str()) == Some(obj)
}

/// Evaluates `rel(a, b)` against a world snapshot. `holding` ignores `b`, matching the
/// unary literal shape; every other relation is false whenever either argument is held
/// (a held object participates in no spatial relation) except the floor special cases
/// called out in the table.
pub fn holds(world: &WorldState, rel: Relation, a: &str, b: &str) -> bool {
    match rel {
        Relation::Holding => is_held(world, a),
        Relation::Above if b == FLOOR => !is_held(world, a) && find(world, a).is_some(),
        Relation::OnTop if b == FLOOR => {
            matches!(find(world, a), Some(p) if p.height == 0)
        }
        Relation::Inside if b == FLOOR => false,
        _ => {
            if is_held(world, a) || is_held(world, b) {
                return false;
            }
            let (pa, pb) = match (find(world, a), find(world, b)) {
                (Some(pa), Some(pb)) => (pa, pb),
                _ => return false,
            };
            match rel {
                Relation::LeftOf => pa.column < pb.column,
                Relation::RightOf => pa.column > pb.column,
                Relation::Beside => (pa.column as isize - pb.column as isize).abs() == 1,
                Relation::Above => pa.column == pb.column && pa.height > pb.height,
                Relation::Under => pa.column == pb.column && pa.height < pb.height,
                Relation::OnTop => pa.column == pb.column && pa.height == pb.height + 1,
                Relation::Inside => {
                    pa.column == pb.column
                        && pa.height == pb.height + 1
                        && world.def(b).map(|d| d.form) == Some(Form::Box)
                }
                Relation::Holding => unreachable!("handled above"),
            }
        }
    }
}

/// Stacking legality: can `a` be placed directly on top of `b`? Symmetric to the
/// world's own invariant, and used by the successor generator to decide whether `D`
/// (drop) is a legal action.
pub fn can_rest_on(a: &ObjectDef, b: &ObjectDef) -> bool {
    if b.form == Form::Ball {
        return false;
    }
    if a.form == Form::Ball && b.form != Form::Box {
        return false;
    }
    if b.size == Size::Small && a.size == Size::Large {
        return false;
    }
    if b.size == Size::Large && a.size == Size::Small {
        return true;
    }
    // From here on, a and b are the same size.
    if b.form == Form::Box {
        return !matches!(a.form, Form::Pyramid | Form::Plank | Form::Box);
    }
    if b.size == Size::Small && matches!(b.form, Form::Brick | Form::Pyramid) {
        return a.form != Form::Box;
    }
    if b.size == Size::Large && a.form == Form::Box && b.form == Form::Pyramid {
        return false;
    }
    true
}

/// `can_rest_on` extended with the "resting on the floor is always legal" case used
/// by the successor generator, which never has to resolve `"floor"` through the
/// catalogue.
pub fn can_rest_on_floor_or(world: &WorldState, a: &str, b: Option<&str>) -> bool {
    match b {
        None => true,
        Some(b) => match (world.def(a), world.def(b)) {
            (Some(a), Some(b)) => can_rest_on(a, b),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Catalogue, Holding};

    fn def(form: Form, size: Size) -> ObjectDef {
        ObjectDef {
            form,
            size,
            color: "red".to_owned(),
        }
    }

    fn small_world() -> WorldState {
        let mut objects = Catalogue::new();
        objects.insert("a".to_owned(), def(Form::Brick, Size::Small));
        objects.insert("b".to_owned(), def(Form::Brick, Size::Small));
        objects.insert("e".to_owned(), def(Form::Ball, Size::Small));
        WorldState {
            objects,
            stacks: vec![vec!["a".to_owned()], vec![], vec!["b".to_owned(), "e".to_owned()]],
            holding: Holding::Empty,
            arm: 0,
        }
    }

    #[test]
    fn leftof_rightof_are_column_order() {
        let w = small_world();
        assert!(holds(&w, Relation::LeftOf, "a", "b"));
        assert!(holds(&w, Relation::RightOf, "b", "a"));
        assert!(!holds(&w, Relation::LeftOf, "b", "a"));
    }

    #[test]
    fn ontop_floor_special_case() {
        let w = small_world();
        assert!(holds(&w, Relation::OnTop, "a", FLOOR));
        assert!(!holds(&w, Relation::OnTop, "e", FLOOR));
    }

    #[test]
    fn above_floor_is_true_for_any_stacked_object() {
        let w = small_world();
        assert!(holds(&w, Relation::Above, "e", FLOOR));
    }

    #[test]
    fn held_objects_satisfy_no_spatial_relation() {
        let mut w = small_world();
        w.holding = Holding::Object("a".to_owned());
        w.stacks[0].clear();
        assert!(!holds(&w, Relation::LeftOf, "a", "b"));
        assert!(!holds(&w, Relation::OnTop, "a", FLOOR));
        assert!(holds(&w, Relation::Holding, "a", "a"));
    }

    #[test]
    fn balls_support_nothing() {
        let ball = def(Form::Ball, Size::Small);
        let brick = def(Form::Brick, Size::Small);
        assert!(!can_rest_on(&brick, &ball));
    }

    #[test]
    fn balls_must_be_in_boxes() {
        let ball = def(Form::Ball, Size::Small);
        let box_ = def(Form::Box, Size::Small);
        let brick = def(Form::Brick, Size::Small);
        assert!(can_rest_on(&ball, &box_));
        assert!(!can_rest_on(&ball, &brick));
    }

    #[test]
    fn small_cannot_support_large() {
        let small = def(Form::Brick, Size::Small);
        let large = def(Form::Brick, Size::Large);
        assert!(!can_rest_on(&large, &small));
        assert!(can_rest_on(&small, &large));
    }

    #[test]
    fn small_boxes_cannot_go_in_small_pyramids_or_bricks() {
        let box_ = def(Form::Box, Size::Small);
        let pyramid = def(Form::Pyramid, Size::Small);
        let brick = def(Form::Brick, Size::Small);
        assert!(!can_rest_on(&box_, &pyramid));
        assert!(!can_rest_on(&box_, &brick));
    }

    #[test]
    fn large_pyramids_cannot_support_large_boxes() {
        let box_ = def(Form::Box, Size::Large);
        let pyramid = def(Form::Pyramid, Size::Large);
        assert!(!can_rest_on(&box_, &pyramid));
    }
}
