use std::collections::BTreeSet;

use anyhow::{Result, ensure};
use clap::Parser;
use pathseed::{
    BossPathResolver, GenerationRules, MapGenerator, PathPhase, RulesPreset, final_boss,
    sin_bosses,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn fuzz_run(rng: &mut ChaCha8Rng, run_seed: &str) -> Result<usize> {
    let mut resolver = BossPathResolver::new(run_seed);
    let mut defeated = BTreeSet::new();

    loop {
        let use_left = choose(rng, &[true, false]);
        let Some(location) = resolver.select_next_boss(use_left) else {
            break;
        };
        let converged = resolver.state().is_paths_converged;
        let remaining = sin_bosses().iter().filter(|l| !resolver.is_defeated(l.boss)).count();
        if !converged && resolver.available_count() >= 2 {
            ensure!(
                resolver.select_next_boss(true) != resolver.select_next_boss(false),
                "paths collapsed for seed {run_seed:?}"
            );
        }
        ensure!(!converged || location == final_boss(), "converged run left the final boss");
        if location == final_boss() {
            ensure!(
                converged || (!use_left && remaining == 1),
                "final boss offered out of turn for seed {run_seed:?}"
            );
        }
        ensure!(defeated.insert(location.boss), "{} offered twice", location.boss);

        // Saving and restoring mid-run must not change the next picks.
        let mut restored = BossPathResolver::new("");
        restored.load_state(resolver.current_state());
        ensure!(
            restored.select_next_boss(true) == resolver.select_next_boss(true),
            "restored state disagrees for seed {run_seed:?}"
        );

        resolver.mark_boss_as_defeated(location.boss);
        if choose(rng, &[false, false, true]) {
            // Duplicate defeats are ignored.
            resolver.mark_boss_as_defeated(location.boss);
        }
    }

    ensure!(resolver.phase() == PathPhase::Exhausted, "run stalled for seed {run_seed:?}");
    Ok(defeated.len())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let presets = [RulesPreset::Safe, RulesPreset::Balanced, RulesPreset::Risky];

    for run in 0..args.runs {
        let run_seed = format!("fuzz-{}-{}", args.seed, rng.next_u32());
        let encounters = fuzz_run(&mut rng, &run_seed)?;
        ensure!(encounters == 8, "run {run} saw {encounters} encounters");

        let generator = MapGenerator::new(GenerationRules::for_preset(choose(&mut rng, &presets)));
        let map = generator.generate(&run_seed);
        ensure!(
            map.fingerprint() == generator.generate(&run_seed).fingerprint(),
            "map for {run_seed:?} is not reproducible"
        );
        for layer in &map.layers {
            ensure!(layer.boss_node().is_some(), "layer {} has no boss node", layer.layer_index);
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
