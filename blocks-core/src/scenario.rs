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

//! Scenario (de)serialization and canned fixtures, gated behind the
//! `scenario` feature. The core library never touches a filesystem; this module only
//! supplies the serde impls and plain constructors that the CLI and tests load JSON
//! through — nothing here opens a file.

use serde::{Deserialize, Serialize};

use crate::command::Parse;
use crate::world::WorldState;

/// A `WorldState` plus the pre-parsed commands to run against it — the unit the CLI's
/// `--demo`/file-loading mode consumes.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub world: WorldState,
    pub commands: Vec<Parse>,
}

/// Canned worlds matching the usual textbook blocks-world example, reused by unit
/// tests and by the CLI's built-in demo scenarios so neither has to hand-build a
/// catalogue.
pub mod fixtures {
    use crate::command::Parse;
    use crate::world::{Catalogue, Form, Holding, ObjectDef, Size, WorldState};

    use super::Scenario;

    fn object(form: Form, size: Size, color: &str) -> ObjectDef {
        ObjectDef {
            form,
            size,
            color: color.to_owned(),
        }
    }

    /// Four columns, five objects `a`..`e`, one ball (`e`) on top of column 2 — the
    /// base world for "take the ball" and "take the ball in the box" style commands.
    pub fn small_world() -> WorldState {
        let mut objects = Catalogue::new();
        objects.insert("a".to_owned(), object(Form::Brick, Size::Small, "red"));
        objects.insert("b".to_owned(), object(Form::Brick, Size::Large, "blue"));
        objects.insert("c".to_owned(), object(Form::Plank, Size::Large, "green"));
        objects.insert("d".to_owned(), object(Form::Box, Size::Large, "yellow"));
        objects.insert("e".to_owned(), object(Form::Ball, Size::Small, "white"));
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

    /// Adds a second ball and a second box, for "put all balls in all boxes" style
    /// commands.
    pub fn medium_world() -> WorldState {
        let mut world = small_world();
        world
            .objects
            .insert("f".to_owned(), object(Form::Ball, Size::Small, "black"));
        world.stacks.push(vec!["f".to_owned()]);
        world
            .objects
            .insert("g".to_owned(), object(Form::Box, Size::Large, "purple"));
        world.stacks.push(vec!["g".to_owned()]);
        world
    }

    /// Adds a third brick and a second plank, for "move any brick left of any plank"
    /// style commands.
    pub fn large_world() -> WorldState {
        let mut world = medium_world();
        world
            .objects
            .insert("h".to_owned(), object(Form::Brick, Size::Small, "orange"));
        world.stacks.push(vec!["h".to_owned()]);
        world
            .objects
            .insert("i".to_owned(), object(Form::Plank, Size::Small, "cyan"));
        world.stacks.push(vec!["i".to_owned()]);
        world
    }

    /// The ambiguity fixture: two balls, nothing else distinguishes them by form.
    pub fn two_balls_world() -> WorldState {
        let mut world = small_world();
        world
            .objects
            .insert("f".to_owned(), object(Form::Ball, Size::Small, "black"));
        world.stacks.push(vec!["f".to_owned()]);
        world
    }

    pub fn small_scenario(commands: Vec<Parse>) -> Scenario {
        Scenario {
            world: small_world(),
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn small_world_validates() {
        assert!(small_world().validate().is_ok());
    }

    #[test]
    fn medium_world_validates() {
        assert!(medium_world().validate().is_ok());
    }

    #[test]
    fn large_world_validates() {
        assert!(large_world().validate().is_ok());
    }

    #[test]
    fn scenario_round_trips_through_json() {
        let scenario = small_scenario(Vec::new());
        let json = serde_json::to_string(&scenario).expect("serializable");
        let back: Scenario = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(scenario.world, back.world);
    }
}
