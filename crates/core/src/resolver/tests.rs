use std::collections::BTreeSet;
use std::time::Instant;

use super::*;
use crate::bosses::{SIN_BOSS_COUNT, keys};

fn defeat_all_sins(resolver: &mut BossPathResolver) {
    for location in sin_bosses() {
        resolver.mark_boss_as_defeated(location.boss);
    }
}

/// Alternates sides, defeating whatever each side picks, until nothing is left.
fn play_out(resolver: &mut BossPathResolver, sides: &[bool]) -> Vec<&'static str> {
    let mut picks = Vec::new();
    let mut step = 0;
    while let Some(location) = resolver.select_next_boss(sides[step % sides.len()]) {
        picks.push(location.boss);
        resolver.mark_boss_as_defeated(location.boss);
        step += 1;
    }
    picks
}

#[test]
fn reset_restores_full_catalog() {
    let mut resolver = BossPathResolver::new("first");
    resolver.mark_boss_as_defeated(keys::PRIDE);
    resolver.reset_with_new_seed("second");

    let state = resolver.current_state();
    assert_eq!(state.current_seed, "second");
    assert!(state.defeated_bosses.is_empty());
    assert_eq!(state.available_bosses, BOSS_CATALOG.to_vec());
    assert!(!state.is_paths_converged);
    assert_eq!(resolver.phase(), PathPhase::Active);
    assert_eq!(resolver.seed_hash(), seed_hash("second"));
}

#[test]
fn left_and_right_diverge_at_every_decision_point() {
    for seed in ["abc", "", "divergence", "🐉", "12345"] {
        let mut resolver = BossPathResolver::new(seed);
        while resolver.available_count() >= 2 && !resolver.state().is_paths_converged {
            let left = resolver.select_next_boss(true).unwrap();
            let right = resolver.select_next_boss(false).unwrap();
            assert_ne!(left, right, "seed {seed:?} collapsed paths onto {}", left.boss);
            resolver.mark_boss_as_defeated(left.boss);
        }
    }
}

#[test]
fn repeated_selection_without_defeats_is_stable() {
    let resolver = BossPathResolver::new("stable");
    let left = resolver.select_next_boss(true);
    let right = resolver.select_next_boss(false);
    for _ in 0..10 {
        assert_eq!(resolver.select_next_boss(true), left);
        assert_eq!(resolver.select_next_boss(false), right);
    }
}

#[test]
fn same_seed_and_call_sequence_reproduce_picks() {
    let sides = [true, false, false, true, true, false, true, false];
    let mut first = BossPathResolver::new("replay");
    let mut second = BossPathResolver::new("other");
    second.reset_with_new_seed("replay");

    assert_eq!(play_out(&mut first, &sides), play_out(&mut second, &sides));
}

#[test]
fn defeated_bosses_are_never_returned_and_pool_shrinks_by_one() {
    let mut resolver = BossPathResolver::new("no-repeat");
    let mut seen = BTreeSet::new();
    let mut expected_available = BOSS_CATALOG.len();
    let mut use_left = true;

    while let Some(location) = resolver.select_next_boss(use_left) {
        assert!(!resolver.is_defeated(location.boss), "{} was already defeated", location.boss);
        assert!(seen.insert(location.boss), "{} was returned twice", location.boss);
        resolver.mark_boss_as_defeated(location.boss);
        expected_available -= 1;
        assert_eq!(resolver.available_count(), expected_available);
        use_left = !use_left;
    }

    assert_eq!(seen.len(), BOSS_CATALOG.len());
    assert_eq!(resolver.phase(), PathPhase::Exhausted);
}

#[test]
fn final_boss_is_withheld_while_two_sins_remain() {
    let mut resolver = BossPathResolver::new("withheld");
    for _ in 0..SIN_BOSS_COUNT - 1 {
        let left = resolver.select_next_boss(true).unwrap();
        let right = resolver.select_next_boss(false).unwrap();
        assert!(!left.is_final());
        assert!(!right.is_final());
        assert!(!resolver.state().is_paths_converged);
        resolver.mark_boss_as_defeated(right.boss);
    }

    let left = resolver.select_next_boss(true).unwrap();
    assert!(!left.is_final());
    resolver.mark_boss_as_defeated(left.boss);
    assert!(resolver.state().is_paths_converged);
}

#[test]
fn convergence_sends_both_paths_to_final_boss() {
    let mut resolver = BossPathResolver::new("converge");
    defeat_all_sins(&mut resolver);

    assert!(resolver.state().is_paths_converged);
    assert_eq!(resolver.phase(), PathPhase::Converged);
    assert_eq!(resolver.select_next_boss(true), Some(final_boss()));
    assert_eq!(resolver.select_next_boss(false), Some(final_boss()));

    resolver.mark_boss_as_defeated(keys::FINAL);
    assert_eq!(resolver.phase(), PathPhase::Exhausted);
    assert_eq!(resolver.select_next_boss(true), None);
    assert_eq!(resolver.select_next_boss(false), None);
}

#[test]
fn last_sin_and_final_boss_split_across_paths() {
    for seed in ["abc", "last-sin"] {
        let mut resolver = BossPathResolver::new(seed);
        for location in &sin_bosses()[..SIN_BOSS_COUNT - 1] {
            resolver.mark_boss_as_defeated(location.boss);
        }
        let remaining = &sin_bosses()[SIN_BOSS_COUNT - 1];
        assert_eq!(resolver.available_count(), 2);
        assert_eq!(resolver.select_next_boss(true), Some(remaining));
        assert_eq!(resolver.select_next_boss(false), Some(final_boss()));
        assert!(!resolver.state().is_paths_converged);
    }
}

#[test]
fn taking_final_boss_early_leaves_last_sin_on_both_paths() {
    let mut resolver = BossPathResolver::new("final-on-right");
    for location in &sin_bosses()[..SIN_BOSS_COUNT - 1] {
        resolver.mark_boss_as_defeated(location.boss);
    }
    let right = resolver.select_next_boss(false).unwrap();
    resolver.mark_boss_as_defeated(right.boss);
    assert!(right.is_final());
    assert_eq!(resolver.available_count(), 1);

    let remaining = &sin_bosses()[SIN_BOSS_COUNT - 1];
    assert_eq!(resolver.select_next_boss(true), Some(remaining));
    assert_eq!(resolver.select_next_boss(false), Some(remaining));
    resolver.mark_boss_as_defeated(remaining.boss);
    assert!(resolver.state().is_paths_converged);
    assert_eq!(resolver.phase(), PathPhase::Exhausted);
    assert_eq!(resolver.select_next_boss(true), None);
}

#[test]
fn marking_is_idempotent_and_ignores_unknown_names() {
    let mut resolver = BossPathResolver::new("idempotent");
    resolver.mark_boss_as_defeated(keys::GREED);
    let after_first = resolver.current_state();

    resolver.mark_boss_as_defeated(keys::GREED);
    assert_eq!(resolver.current_state(), after_first);

    resolver.mark_boss_as_defeated("Apathy");
    resolver.mark_boss_as_defeated("");
    assert_eq!(resolver.current_state(), after_first);
    assert_eq!(resolver.available_count(), BOSS_CATALOG.len() - 1);
}

#[test]
fn early_final_defeat_does_not_block_convergence() {
    let mut resolver = BossPathResolver::new("final-first");
    resolver.mark_boss_as_defeated(keys::FINAL);
    assert!(!resolver.state().is_paths_converged);

    defeat_all_sins(&mut resolver);
    assert!(resolver.state().is_paths_converged);
    assert_eq!(resolver.phase(), PathPhase::Exhausted);
    assert_eq!(resolver.select_next_boss(true), None);
}

#[test]
fn loaded_state_reproduces_source_selections() {
    let sides = [false, true, true, false, true, false, false, true];
    let mut source = BossPathResolver::new("save-me");
    source.mark_boss_as_defeated(keys::WRATH);
    let first_pick = source.select_next_boss(true).unwrap();
    source.mark_boss_as_defeated(first_pick.boss);

    let mut restored = BossPathResolver::new("unrelated");
    restored.load_state(source.current_state());
    assert_eq!(restored.seed_hash(), source.seed_hash());
    assert_eq!(restored.select_next_boss(true), source.select_next_boss(true));
    assert_eq!(restored.select_next_boss(false), source.select_next_boss(false));

    assert_eq!(play_out(&mut restored, &sides), play_out(&mut source, &sides));
}

#[test]
fn state_survives_json_round_trip() {
    let mut resolver = BossPathResolver::new("json");
    resolver.mark_boss_as_defeated(keys::ENVY);
    resolver.mark_boss_as_defeated(keys::LUST);

    let json = serde_json::to_string(&resolver.current_state()).unwrap();
    let decoded: PathState = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, resolver.current_state());

    let mut restored = BossPathResolver::new("");
    restored.load_state(decoded);
    assert_eq!(restored.select_next_boss(true), resolver.select_next_boss(true));
    assert_eq!(restored.select_next_boss(false), resolver.select_next_boss(false));
}

#[test]
fn different_seeds_open_differently() {
    let openings: BTreeSet<_> = (0..32)
        .map(|seed| {
            let resolver = BossPathResolver::new(&format!("opening-{seed}"));
            resolver.select_next_boss(true).map(|location| location.boss)
        })
        .collect();
    assert!(openings.len() > 1, "every seed opened with the same boss: {openings:?}");
}

#[test]
fn thousand_alternating_selections_are_fast() {
    let resolver = BossPathResolver::new("timing");
    let started = Instant::now();
    for step in 0..1000 {
        assert!(resolver.select_next_boss(step % 2 == 0).is_some());
    }
    assert!(started.elapsed().as_millis() < 1000, "selection took {:?}", started.elapsed());
}
