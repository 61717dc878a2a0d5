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

//! Resolves entity descriptions under quantifiers to world object identifiers and
//! synthesises a [`Goal`] in mixed AND/OR form. The hard part is the 3×3 quantifier
//! cross-product in [`make_moving_goal`] and the deferred-disambiguation policy in
//! [`in_location`].

pub mod error;

use std::collections::BTreeSet;

use crate::command::{Command, Description, Entity, ObjPattern, Parse, Quantifier, ANY_FORM};
use crate::goal::{Goal, Literal};
use crate::physics::{holds, Relation};
use crate::world::{ObjectId, WorldState, FLOOR};

pub use error::{AggregateError, InterpretError};

/// A resolved set of matching identifiers, still carrying the quantifier it was
/// resolved under — the quantifier is not collapsed until [`make_holding_goal`] or
/// [`make_moving_goal`] assembles the final goal.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CandList {
    pub candidates: Vec<ObjectId>,
    pub quant: Quantifier,
}

fn description_matches(desc: &Description, world: &WorldState, id: &str) -> bool {
    if id == FLOOR {
        return desc.form == FLOOR;
    }
    let def = match world.def(id) {
        Some(def) => def,
        None => return false,
    };
    if desc.form != ANY_FORM && desc.form != def.form.to_string() {
        return false;
    }
    if let Some(color) = &desc.color {
        if *color != def.color {
            return false;
        }
    }
    if let Some(size) = &desc.size {
        if *size != def.size.to_string() {
            return false;
        }
    }
    true
}

/// `inLocation` semantics: `the` and `any` both mean "stands in `rel` with
/// *some* member of `list`" — deliberately deferred so a nested reference like "the
/// ball in the box" doesn't fail early just because there happen to be several boxes.
/// `all` requires standing in `rel` with *every* member.
fn in_location(world: &WorldState, c: &str, rel: Relation, list: &CandList) -> bool {
    match list.quant {
        Quantifier::All => list.candidates.iter().all(|o| holds(world, rel, c, o)),
        Quantifier::The | Quantifier::Any => {
            list.candidates.iter().any(|o| holds(world, rel, c, o))
        }
    }
}

/// Folds a recursive `obj` description into the identifiers it matches. The floor is a
/// candidate only for the literal leaf form `"floor"`, and never participates in a
/// recursive (`Located`) description on the subject side.
pub fn resolve_obj(world: &WorldState, obj: &ObjPattern) -> Vec<ObjectId> {
    match obj {
        ObjPattern::Leaf(desc) => {
            if desc.form == FLOOR {
                return vec![FLOOR.to_owned()];
            }
            world
                .all_ids()
                .filter(|id| description_matches(desc, world, id))
                .cloned()
                .collect()
        }
        ObjPattern::Located { obj, loc } => {
            let inner = resolve_obj(world, obj);
            let list = resolve_entity(world, &loc.ent);
            inner
                .into_iter()
                .filter(|c| c != FLOOR && in_location(world, c, loc.rel, &list))
                .collect()
        }
    }
}

pub fn resolve_entity(world: &WorldState, ent: &Entity) -> CandList {
    CandList {
        candidates: resolve_obj(world, &ent.obj),
        quant: ent.quant,
    }
}

/// `take` goal construction.
pub fn make_holding_goal(list: &CandList) -> Result<Goal, InterpretError> {
    if list.candidates.is_empty() {
        return Err(InterpretError::NoMatch);
    }
    match list.quant {
        Quantifier::All if list.candidates.len() > 1 => Err(InterpretError::CannotHoldMany),
        Quantifier::The if list.candidates.len() > 1 => {
            Err(InterpretError::ObjectAmbiguity(list.candidates.clone()))
        }
        _ => Ok(Goal::or(
            list.candidates
                .iter()
                .map(|c| Goal::leaf(Literal::holding(c)))
                .collect(),
        )),
    }
}

/// `put`/`move` goal construction: dispatches on the 3×3 quantifier cross-product of
/// subject and object.
pub fn make_moving_goal(
    rel: Relation,
    subj: &CandList,
    obj: &CandList,
) -> Result<Goal, InterpretError> {
    if subj.candidates.is_empty() || obj.candidates.is_empty() {
        return Err(InterpretError::NoMatch);
    }
    if subj.quant == Quantifier::The && subj.candidates.len() > 1 {
        return Err(InterpretError::ObjectAmbiguity(subj.candidates.clone()));
    }
    if obj.quant == Quantifier::The && obj.candidates.len() > 1 {
        return Err(InterpretError::ObjectAmbiguity(obj.candidates.clone()));
    }
    let lit = |s: &str, o: &str| Goal::leaf(Literal::positive(rel, vec![s.to_owned(), o.to_owned()]));

    let per_subject = |s: &str| -> Goal {
        match obj.quant {
            Quantifier::The => lit(s, &obj.candidates[0]),
            Quantifier::Any => Goal::or(obj.candidates.iter().map(|o| lit(s, o)).collect()),
            Quantifier::All => Goal::and(obj.candidates.iter().map(|o| lit(s, o)).collect()),
        }
    };

    let goal = match subj.quant {
        Quantifier::The => per_subject(&subj.candidates[0]),
        Quantifier::Any => {
            Goal::or(subj.candidates.iter().map(|s| per_subject(s)).collect())
        }
        Quantifier::All => {
            Goal::and(subj.candidates.iter().map(|s| per_subject(s)).collect())
        }
    };
    Ok(goal)
}

fn goal_for_command(world: &WorldState, cmd: &Command) -> Result<Goal, InterpretError> {
    match cmd {
        Command::Take { ent } => make_holding_goal(&resolve_entity(world, ent)),
        Command::Put { loc } => {
            let held = world
                .holding
                .as_object()
                .ok_or(InterpretError::ArmEmpty)?
                .clone();
            let subj = CandList {
                candidates: vec![held],
                quant: Quantifier::The,
            };
            let obj = resolve_entity(world, &loc.ent);
            make_moving_goal(loc.rel, &subj, &obj)
        }
        Command::Move { ent, loc } => {
            let subj = resolve_entity(world, ent);
            let obj = resolve_entity(world, &loc.ent);
            make_moving_goal(loc.rel, &subj, &obj)
        }
    }
}

/// One element of the [`interpret`] result set.
#[derive(Clone, PartialEq, Debug)]
pub struct Interpretation {
    pub parse: Parse,
    pub goal: Goal,
}

fn form_of(world: &WorldState, id: &str) -> String {
    if id == FLOOR {
        FLOOR.to_owned()
    } else {
        world
            .def(id)
            .map(|d| d.form.to_string())
            .unwrap_or_else(|| id.to_owned())
    }
}

/// `interpret(parses, world) → list of (parse, goal)`. Processes every candidate
/// parse in order, keeping only the semantically valid ones, then applies the
/// cross-parse aggregation policy: exactly one survivor is returned; zero
/// survivors with at least one ambiguity is reported as "possibly ambiguous"; zero
/// survivors with none is "no valid interpretation"; more than one is "ambiguous
/// command".
///
/// Every single-parse failure other than `ObjectAmbiguity` (an empty arm, trying to
/// hold more than one object, ...) is folded into the "no valid interpretation"
/// outcome rather than surfaced distinctly: a single parse can only ever mean one
/// thing, and this aggregation is defined over the candidate *parses*, not over the
/// variety of reasons any one of them failed to resolve.
pub fn interpret(
    parses: &[Parse],
    world: &WorldState,
) -> Result<Vec<Interpretation>, AggregateError> {
    let mut valid = Vec::new();
    let mut ambiguous_forms: BTreeSet<String> = BTreeSet::new();

    for parse in parses {
        match goal_for_command(world, &parse.prs) {
            Ok(goal) => valid.push(Interpretation {
                parse: parse.clone(),
                goal,
            }),
            Err(InterpretError::ObjectAmbiguity(candidates)) => {
                for c in candidates {
                    ambiguous_forms.insert(form_of(world, &c));
                }
            }
            Err(_) => {}
        }
    }

    match valid.len() {
        1 => Ok(valid),
        0 if !ambiguous_forms.is_empty() => Err(AggregateError::PossiblyAmbiguous {
            forms: ambiguous_forms.into_iter().collect(),
        }),
        0 => Err(AggregateError::NoValidInterpretation),
        n => Err(AggregateError::AmbiguousCommand { interpretations: n }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Catalogue, Form, Holding, ObjectDef, Size};

    fn def(form: Form, size: Size, color: &str) -> ObjectDef {
        ObjectDef {
            form,
            size,
            color: color.to_owned(),
        }
    }

    fn standard_world() -> WorldState {
        let mut objects = Catalogue::new();
        objects.insert("a".to_owned(), def(Form::Brick, Size::Small, "red"));
        objects.insert("b".to_owned(), def(Form::Brick, Size::Large, "blue"));
        objects.insert("c".to_owned(), def(Form::Plank, Size::Large, "green"));
        objects.insert("d".to_owned(), def(Form::Box, Size::Large, "yellow"));
        objects.insert("e".to_owned(), def(Form::Ball, Size::Small, "white"));
        WorldState {
            objects,
            stacks: vec![
                vec!["a".to_owned()],
                vec!["b".to_owned()],
                vec!["c".to_owned(), "e".to_owned()],
                vec!["d".to_owned()],
            ],
            holding: Holding::Empty,
            arm: 0,
        }
    }

    fn leaf(form: &str) -> ObjPattern {
        ObjPattern::Leaf(Description {
            form: form.to_owned(),
            color: None,
            size: None,
        })
    }

    #[test]
    fn take_the_ball_resolves_to_single_holding_goal() {
        let world = standard_world();
        let ent = Entity {
            quant: Quantifier::The,
            obj: leaf("ball"),
        };
        let goal = make_holding_goal(&resolve_entity(&world, &ent)).unwrap();
        assert_eq!(goal, Goal::leaf(Literal::holding("e")));
    }

    #[test]
    fn take_the_ball_with_two_balls_is_ambiguous() {
        let mut world = standard_world();
        world
            .objects
            .insert("f".to_owned(), def(Form::Ball, Size::Small, "black"));
        world.stacks.push(vec!["f".to_owned()]);
        let ent = Entity {
            quant: Quantifier::The,
            obj: leaf("ball"),
        };
        let err = make_holding_goal(&resolve_entity(&world, &ent)).unwrap_err();
        match err {
            InterpretError::ObjectAmbiguity(mut cands) => {
                cands.sort();
                assert_eq!(cands, vec!["e".to_owned(), "f".to_owned()]);
            }
            other => panic!("expected ObjectAmbiguity, got {:?}", other),
        }
    }

    #[test]
    fn take_all_balls_with_multiple_fails_cannot_hold_many() {
        let mut world = standard_world();
        world
            .objects
            .insert("f".to_owned(), def(Form::Ball, Size::Small, "black"));
        world.stacks.push(vec!["f".to_owned()]);
        let ent = Entity {
            quant: Quantifier::All,
            obj: leaf("ball"),
        };
        let err = make_holding_goal(&resolve_entity(&world, &ent)).unwrap_err();
        assert_eq!(err, InterpretError::CannotHoldMany);
    }

    #[test]
    fn put_all_balls_in_all_boxes_is_and_of_inside() {
        let mut world = standard_world();
        world
            .objects
            .insert("f".to_owned(), def(Form::Ball, Size::Small, "black"));
        world.stacks.push(vec!["f".to_owned()]);
        world
            .objects
            .insert("g".to_owned(), def(Form::Box, Size::Large, "purple"));
        world.stacks.push(vec!["g".to_owned()]);

        let subj = CandList {
            candidates: vec!["e".to_owned(), "f".to_owned()],
            quant: Quantifier::All,
        };
        let obj = CandList {
            candidates: vec!["d".to_owned(), "g".to_owned()],
            quant: Quantifier::All,
        };
        let goal = make_moving_goal(Relation::Inside, &subj, &obj).unwrap();
        assert_eq!(goal.clauses().len(), 1);
        assert_eq!(goal.clauses()[0].len(), 4);
    }

    #[test]
    fn move_any_brick_left_of_any_plank_is_six_way_or() {
        let subj = CandList {
            candidates: vec!["a".to_owned(), "b".to_owned(), "x".to_owned()],
            quant: Quantifier::Any,
        };
        let obj = CandList {
            candidates: vec!["c".to_owned(), "y".to_owned()],
            quant: Quantifier::Any,
        };
        let world = standard_world();
        let goal = make_moving_goal(Relation::LeftOf, &subj, &obj).unwrap();
        let clauses = goal.clauses();
        assert_eq!(clauses.len(), 6);
        for clause in &clauses {
            assert_eq!(clause.len(), 1);
        }
    }

    #[test]
    fn empty_candidates_on_either_side_fail_no_match() {
        let world = standard_world();
        let subj = CandList {
            candidates: vec![],
            quant: Quantifier::The,
        };
        let obj = CandList {
            candidates: vec!["c".to_owned()],
            quant: Quantifier::The,
        };
        assert_eq!(
            make_moving_goal(Relation::OnTop, &subj, &obj).unwrap_err(),
            InterpretError::NoMatch
        );
    }
}
