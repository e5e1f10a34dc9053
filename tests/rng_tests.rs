//! RNG tests for gofish-engine
//!
//! Эти тесты проверяют:
//! - детерминированность DeterministicRng
//! - корректную работу shuffle() / shuffled()
//! - равномерность тасовки и выбора из пула (статистически)
//! - pick_and_remove и пустой пул
//! - стабильность hash-reseeding RngSeed

use std::collections::HashMap;

use gofish_engine::engine::{EngineError, RandomSource};
use gofish_engine::infra::{DeterministicRng, RngSeed, SystemRng};

//
// TEST 1 — DeterministicRng reproducibility
//
#[test]
fn deterministic_rng_same_seed_same_shuffle() {
    let mut r1 = DeterministicRng::from_u64(123);
    let mut r2 = DeterministicRng::from_u64(123);

    let mut a: Vec<u32> = (0..52).collect();
    let mut b: Vec<u32> = (0..52).collect();

    r1.shuffle(&mut a);
    r2.shuffle(&mut b);

    assert_eq!(a, b, "Same seed must produce identical shuffle");
}

//
// TEST 2 — different seeds produce different shuffle
//
#[test]
fn deterministic_rng_different_seeds_different_shuffle() {
    let mut r1 = DeterministicRng::from_u64(111);
    let mut r2 = DeterministicRng::from_u64(222);

    let mut a: Vec<u32> = (0..52).collect();
    let mut b: Vec<u32> = (0..52).collect();

    r1.shuffle(&mut a);
    r2.shuffle(&mut b);

    assert_ne!(a, b, "Different seeds must produce different shuffle");
}

//
// TEST 3 — shuffle is a permutation
//
#[test]
fn shuffle_produces_no_duplicates() {
    let mut rng = DeterministicRng::from_u64(555);

    let mut items = (0..52).collect::<Vec<u32>>();
    rng.shuffle(&mut items);

    let mut sorted = items.clone();
    sorted.sort_unstable();
    sorted.dedup();

    assert_eq!(sorted, (0..52).collect::<Vec<u32>>());
}

//
// TEST 4 — shuffled() works on a copy
//
#[test]
fn shuffled_does_not_touch_input() {
    let mut rng = DeterministicRng::from_u64(9);
    let input: Vec<u32> = (0..10).collect();

    let out = rng.shuffled(&input);

    assert_eq!(input, (0..10).collect::<Vec<u32>>());
    assert_eq!(out.len(), input.len());
}

//
// TEST 5 — all 4! permutations appear with roughly equal frequency
//
#[test]
fn shuffle_is_close_to_uniform() {
    let mut rng = DeterministicRng::from_u64(2024);
    let runs = 24_000;
    let mut counts: HashMap<Vec<u8>, u32> = HashMap::new();

    for _ in 0..runs {
        let perm = rng.shuffled(&[0u8, 1, 2, 3]);
        *counts.entry(perm).or_default() += 1;
    }

    assert_eq!(counts.len(), 24, "every permutation must be reachable");
    for (perm, count) in &counts {
        assert!(
            (800..=1200).contains(count),
            "permutation {perm:?} seen {count} times, expected ~1000"
        );
    }
}

//
// TEST 6 — uniform_int is inclusive on both ends
//
#[test]
fn uniform_int_hits_both_bounds() {
    let mut rng = DeterministicRng::from_u64(5);
    let mut seen = [false; 3];

    for _ in 0..3_000 {
        let v = rng.uniform_int(1, 3);
        assert!((1..=3).contains(&v));
        seen[(v - 1) as usize] = true;
    }

    assert_eq!(seen, [true, true, true]);
}

//
// TEST 7 — pick_and_remove shrinks the pool and picks uniformly
//
#[test]
fn pick_and_remove_is_uniform() {
    let mut rng = DeterministicRng::from_u64(31337);
    let mut counts = [0u32; 5];

    for _ in 0..50_000 {
        let mut pool = vec![0usize, 1, 2, 3, 4];
        let picked = rng.pick_and_remove(&mut pool).unwrap();
        assert_eq!(pool.len(), 4);
        assert!(!pool.contains(&picked));
        counts[picked] += 1;
    }

    for (idx, count) in counts.iter().enumerate() {
        assert!(
            (9_400..=10_600).contains(count),
            "index {idx} picked {count} times, expected ~10000"
        );
    }
}

//
// TEST 8 — empty pool is an error, not a panic
//
#[test]
fn pick_from_empty_pool_fails() {
    let mut rng = DeterministicRng::from_u64(1);
    let mut pool: Vec<String> = Vec::new();

    assert_eq!(rng.pick_and_remove(&mut pool), Err(EngineError::EmptyPool));
}

//
// TEST 9 — SystemRng and DeterministicRng produce different outputs
//
#[test]
fn systemrng_vs_deterministic_rng_are_not_equal() {
    let mut sys = SystemRng::default();
    let mut det = DeterministicRng::from_u64(12345);

    let mut a: Vec<u32> = (0..52).collect();
    let mut b: Vec<u32> = (0..52).collect();

    sys.shuffle(&mut a);
    det.shuffle(&mut b);

    assert_ne!(a, b, "SystemRng should differ from deterministic RNG");
}

//
// TEST 10 — reseeding per game
//
#[test]
fn rngseed_derive_changes_per_game() {
    let base = RngSeed::from_u64(777);

    let g1 = base.derive(1);
    let g2 = base.derive(2);

    assert_ne!(g1, g2, "Different games must get different seeds");
    assert_eq!(g1, base.derive(1), "derive must be stable");
    assert_ne!(g1, RngSeed::from_u64(778).derive(1));
}

//
// TEST 11 — RngSeed → DeterministicRng → shuffle is deterministic
//
#[test]
fn rngseed_deterministic_shuffle() {
    let seed = RngSeed::from_u64(123);

    let mut r1 = seed.to_rng();
    let mut r2 = seed.to_rng();

    let a = r1.shuffled(&(0..20).collect::<Vec<u32>>());
    let b = r2.shuffled(&(0..20).collect::<Vec<u32>>());

    assert_eq!(a, b);
}

//
// TEST 12 — shuffle on tiny slices must not crash
//
#[test]
fn shuffle_tiny_slices_ok() {
    let mut rng = DeterministicRng::from_u64(42);

    let mut empty: Vec<u32> = vec![];
    rng.shuffle(&mut empty);
    assert!(empty.is_empty());

    let mut one = vec![123];
    rng.shuffle(&mut one);
    assert_eq!(one, vec![123]);
}
