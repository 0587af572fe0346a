use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use log::info;
use pathseed::{
    BossPathResolver, GenerationRules, Map, MapGenerator, RulesPreset, RunStateFile, SceneRoute,
    seed_hash,
};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the 32-bit hash of a seed string
    Hash { seed: String },
    /// Generate a map and print a summary or its JSON
    Map {
        /// Seed string; an empty string draws a fresh seed
        #[arg(short, long, default_value = "")]
        seed: String,
        /// Rules preset (safe, balanced, risky)
        #[arg(long)]
        preset: Option<String>,
        /// TOML or JSON file with generation rules
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Print the full map as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play boss selection for a sequence of path sides, e.g. `LRRL`
    Route {
        #[arg(short, long)]
        seed: String,
        /// One letter per encounter: L for the left path, R for the right path
        #[arg(short, long, default_value = "LRLRLRLR")]
        paths: String,
        #[arg(long)]
        json: bool,
    },
    /// Play some encounters and write the run state file
    Save {
        #[arg(short, long)]
        seed: String,
        #[arg(short, long, default_value = "")]
        paths: String,
        /// Defaults to the per-user data directory
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Also store the generated map
        #[arg(long)]
        with_map: bool,
    },
    /// Load a run state file and show the next encounter on each path
    Inspect { path: Option<PathBuf> },
}

#[derive(Serialize)]
struct RouteStep {
    step: usize,
    side: &'static str,
    boss: &'static str,
    identifier: &'static str,
    scenes: Vec<String>,
    converged_after: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level)?;

    match args.command {
        Command::Hash { seed } => {
            println!("{}", seed_hash(&seed));
        }
        Command::Map { seed, preset, rules, json } => {
            let rules = load_rules(preset.as_deref(), rules.as_ref())?;
            let map = MapGenerator::new(rules).generate(&seed);
            if json {
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                print_map_summary(&map);
            }
        }
        Command::Route { seed, paths, json } => {
            let sides = parse_sides(&paths)?;
            let mut resolver = BossPathResolver::new(&seed);
            let steps = play_route(&mut resolver, &sides);
            if json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
            } else {
                for step in &steps {
                    println!(
                        "{:>2} {:<5} {:<10} {}",
                        step.step,
                        step.side,
                        step.boss,
                        step.scenes.join(" -> ")
                    );
                }
                println!("Phase: {:?}", resolver.phase());
            }
        }
        Command::Save { seed, paths, out, with_map } => {
            let file = build_run_file(&seed, &parse_sides(&paths)?, with_map);
            let defeated = file.path_state.defeated_bosses.len();
            let path = match out {
                Some(path) => path,
                None => RunStateFile::default_path()
                    .ok_or_else(|| anyhow!("no data directory available; pass --out"))?,
            };
            file.write_atomic(&path)
                .with_context(|| format!("Failed to write run state: {}", path.display()))?;
            info!("saved run state to {}", path.display());
            println!("Saved {} ({defeated} bosses defeated)", path.display());
        }
        Command::Inspect { path } => {
            let path = match path {
                Some(path) => path,
                None => RunStateFile::default_path()
                    .ok_or_else(|| anyhow!("no data directory available; pass a path"))?,
            };
            let file = RunStateFile::load(&path)
                .with_context(|| format!("Failed to load run state: {}", path.display()))?;

            let mut resolver = BossPathResolver::new("");
            resolver.load_state(file.path_state);
            let state = resolver.state();
            println!("Seed: {:?} (hash {})", state.current_seed, resolver.seed_hash());
            println!("Defeated: {:?}", state.defeated_bosses);
            println!("Phase: {:?}", resolver.phase());
            for (label, side) in [("Left", true), ("Right", false)] {
                match resolver.select_next_boss(side) {
                    Some(location) => {
                        println!("{label}: {} ({})", location.boss, location.identifier);
                    }
                    None => println!("{label}: none"),
                }
            }
            if let Some(map) = file.map {
                print_map_summary(&map);
            }
        }
    }

    Ok(())
}

fn initialize_logging(level: &str) -> Result<()> {
    let filter: log::LevelFilter =
        level.parse().with_context(|| format!("Invalid log level: {level}"))?;
    env_logger::Builder::new().filter_level(filter).init();
    Ok(())
}

fn load_rules(preset: Option<&str>, rules_path: Option<&PathBuf>) -> Result<GenerationRules> {
    if let Some(path) = rules_path {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file: {}", path.display()))?;
        let is_json = path.extension().is_some_and(|extension| extension == "json");
        let rules = if is_json {
            GenerationRules::from_json_str(&text)
        } else {
            GenerationRules::from_toml_str(&text)
        };
        return rules.with_context(|| format!("Failed to parse rules file: {}", path.display()));
    }

    let preset = match preset {
        Some(name) => {
            RulesPreset::parse(name).ok_or_else(|| anyhow!("unknown rules preset '{name}'"))?
        }
        None => RulesPreset::default(),
    };
    Ok(GenerationRules::for_preset(preset))
}

fn parse_sides(paths: &str) -> Result<Vec<bool>> {
    paths
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c.to_ascii_uppercase() {
            'L' => Ok(true),
            'R' => Ok(false),
            other => bail!("path side '{other}' must be L or R"),
        })
        .collect()
}

fn play_route(resolver: &mut BossPathResolver, sides: &[bool]) -> Vec<RouteStep> {
    let mut steps = Vec::new();
    for (step, &use_left) in sides.iter().enumerate() {
        let Some(location) = resolver.select_next_boss(use_left) else {
            break;
        };
        resolver.mark_boss_as_defeated(location.boss);
        steps.push(RouteStep {
            step,
            side: if use_left { "left" } else { "right" },
            boss: location.boss,
            identifier: location.identifier,
            scenes: SceneRoute::for_location(location)
                .scenes()
                .iter()
                .map(|scene| scene.to_string())
                .collect(),
            converged_after: resolver.state().is_paths_converged,
        });
    }
    steps
}

fn build_run_file(seed: &str, sides: &[bool], with_map: bool) -> RunStateFile {
    let mut resolver = BossPathResolver::new(seed);
    play_route(&mut resolver, sides);
    let map = with_map.then(|| MapGenerator::default().generate(seed));
    RunStateFile::new(resolver.current_state(), map)
}

fn print_map_summary(map: &Map) {
    println!("Seed: {:?} (hash {})", map.seed, seed_hash(&map.seed));
    println!("Fingerprint: {:016x}", map.fingerprint());
    for layer in &map.layers {
        println!(
            "Layer {} {:<10} @ {:<16} paths={} nodes={}",
            layer.layer_index,
            layer.boss,
            layer.location,
            layer.path_count(),
            layer.nodes.len()
        );
    }
}
