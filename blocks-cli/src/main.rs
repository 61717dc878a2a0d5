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

use std::fs;
use std::path::Path;

use clap::{crate_version, Arg, Command};
use colored::Colorize;
use ptree::TreeBuilder;

use blocks_core::command::Parse;
use blocks_core::goal::{Goal, Op};
use blocks_core::interpret::interpret;
use blocks_core::plan::plan;
use blocks_core::scenario::{fixtures, Scenario};
use blocks_core::world::WorldState;

fn load_scenario(path: &Path) -> Scenario {
    let raw = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("{} reading {}: {}", "error".red().bold(), path.display(), e);
        std::process::exit(1);
    });
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        eprintln!("{} parsing {}: {}", "error".red().bold(), path.display(), e);
        std::process::exit(1);
    })
}

fn goal_tree(goal: &Goal) -> ptree::StringItem {
    let mut builder = TreeBuilder::new("goal".to_owned());
    fn add(builder: &mut TreeBuilder, goal: &Goal) {
        match goal {
            Goal::Leaf(lit) => {
                builder.add_empty_child(lit.to_string());
            }
            Goal::Node(op, children) => {
                let label = match op {
                    Op::And => "AND",
                    Op::Or => "OR",
                };
                builder.begin_child(label.to_owned());
                for child in children.iter().rev() {
                    add(builder, child);
                }
                builder.end_child();
            }
        }
    }
    add(&mut builder, goal);
    builder.build()
}

fn print_plan_trace(steps: &[String]) {
    for (i, step) in steps.iter().enumerate() {
        if i % 2 == 0 {
            println!("  {}", step);
        } else {
            println!("    {}", step.cyan().bold());
        }
    }
}

/// Runs `interpret` then `plan` for every command in the scenario, printing the
/// resolved goal tree and action trace for each, or a colored one-line diagnostic for
/// whichever error kind the pipeline hit.
fn run_scenario(world: &WorldState, commands: &[Parse]) {
    for (i, command) in commands.iter().enumerate() {
        println!("{}", format!("command {}", i + 1).bold());
        match interpret(std::slice::from_ref(command), world) {
            Ok(interpretations) => {
                for interpretation in interpretations {
                    println!("{}", interpretation.goal.to_string().yellow());
                    ptree::print_tree(&goal_tree(&interpretation.goal)).expect("write to stdout");
                    match plan(world, &interpretation.goal) {
                        Ok(steps) if steps.is_empty() => {
                            println!("  {}", "(already satisfied)".green());
                        }
                        Ok(steps) => print_plan_trace(&steps),
                        Err(e) => eprintln!("{} {}", "plan error:".red().bold(), e),
                    }
                }
            }
            Err(e) => eprintln!("{} {}", "interpret error:".red().bold(), e),
        }
    }
}

fn main() {
    let matches = Command::new("blocks")
        .version(crate_version!())
        .about("Interpreter and planner demo for a natural-language blocks-world command processor")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run").about("Run a scenario JSON file through interpret and plan").arg(
                Arg::new("FILE")
                    .required(true)
                    .help("Path to a scenario JSON file ({ world, commands })")
                    .index(1),
            ),
        )
        .subcommand(
            Command::new("demo")
                .about("Run one of the built-in canned scenarios")
                .arg(
                    Arg::new("WORLD")
                        .long("world")
                        .takes_value(true)
                        .possible_values(&["small", "medium", "large"])
                        .default_value("small")
                        .help("Which canned world to load"),
                ),
        )
        .get_matches();

    match matches.subcommand().unwrap() {
        ("run", sub) => {
            let path = Path::new(sub.value_of("FILE").unwrap());
            let scenario = load_scenario(path);
            run_scenario(&scenario.world, &scenario.commands);
        }
        ("demo", sub) => {
            let world = match sub.value_of("WORLD").unwrap() {
                "medium" => fixtures::medium_world(),
                "large" => fixtures::large_world(),
                _ => fixtures::small_world(),
            };
            if let Err(e) = world.validate() {
                eprintln!("{} {}", "invalid world:".red().bold(), e);
                std::process::exit(1);
            }
            let take_the_ball = Parse {
                prs: blocks_core::command::Command::Take {
                    ent: blocks_core::command::Entity::leaf(blocks_core::command::Quantifier::The, "ball"),
                },
            };
            run_scenario(&world, &[take_the_ball]);
        }
        _ => unreachable!("clap enforces subcommand_required"),
    }
}
