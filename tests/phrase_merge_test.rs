//! Integration tests for the merge engine and provenance grouping.

use std::collections::BTreeSet;

use ftmatch::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn token(node_id: NodeId, positions: &[Position], ordinal: u32) -> FtMatch {
    FtMatch::from_scan(ScanEntry::new(node_id, positions.to_vec()).unwrap(), ordinal)
}

/// Strictly ascending random positions.
fn random_positions(rng: &mut StdRng, max_len: usize) -> Vec<Position> {
    let len = rng.random_range(0..=max_len);
    let set: BTreeSet<Position> = (0..len).map(|_| rng.random_range(0..60)).collect();
    set.into_iter().collect()
}

#[test]
fn test_phrase_adjacency_scenario() {
    let merged = merge(token(10, &[3], 1), token(10, &[4], 2), 1).expect("phrase should match");

    assert_eq!(merged.positions(), &[3, 4]);
    assert_eq!(merged.pointers().unwrap().ordinals(), &[1, 2]);
    assert_eq!(merged.num_tokens(), 2);
    assert_eq!(merged.to_record(), vec![10, 3, 4]);
}

#[test]
fn test_co_occurrence_scenario() {
    let merged =
        merge(token(5, &[1, 2, 5], 1), token(5, &[2, 6], 2), 0).expect("AND should match");
    assert_eq!(merged.positions(), &[1, 2, 5, 6]);
}

#[test]
fn test_guards_hold_for_any_window() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let window = rng.random_range(-3..=3);
        let a = random_positions(&mut rng, 6);
        let b = random_positions(&mut rng, 6);

        assert!(merge(token(1, &a, 1), token(2, &b, 2), window).is_none());
        assert!(merge(token(1, &a, 1).with_negated(true), token(1, &b, 2), window).is_none());
    }
}

#[test]
fn test_co_occurrence_is_sorted_union() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let a = random_positions(&mut rng, 8);
        let b = random_positions(&mut rng, 8);

        let result = merge(token(3, &a, 1), token(3, &b, 2), 0);
        if a.is_empty() || b.is_empty() {
            assert!(result.is_none());
            continue;
        }

        let merged = result.expect("non-empty inputs always co-occur");
        let union: Vec<Position> = a
            .iter()
            .chain(&b)
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        assert_eq!(merged.positions(), union.as_slice());

        let expected_ordinals: Vec<u32> = union
            .iter()
            .map(|pos| if a.contains(pos) { 1 } else { 2 })
            .collect();
        assert_eq!(merged.pointers().unwrap().ordinals(), expected_ordinals.as_slice());
    }
}

#[test]
fn test_phrase_emits_every_adjacent_pair() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..500 {
        let window = rng.random_range(1..=3);
        let a = random_positions(&mut rng, 8);
        let b = random_positions(&mut rng, 8);

        let expected: Vec<Position> = a
            .iter()
            .filter(|&&pos| b.contains(&(pos + window as Position)))
            .flat_map(|&pos| [pos, pos + window as Position])
            .collect();

        match merge(token(3, &a, 1), token(3, &b, 2), window) {
            Some(merged) => assert_eq!(merged.positions(), expected.as_slice()),
            None => assert!(expected.is_empty()),
        }
    }
}

#[test]
fn test_grouping_reproduces_merged_sequence() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..200 {
        let a = random_positions(&mut rng, 8);
        let b = random_positions(&mut rng, 8);
        let Some(merged) = merge(token(9, &a, 1), token(9, &b, 2), 0) else {
            continue;
        };

        let positions = merged.positions().to_vec();
        let ordinals = merged.pointers().unwrap().ordinals().to_vec();
        let groups = group_by_token(merged).unwrap();
        assert_eq!(groups.len(), 2);

        // Interleave the buckets back following the pointer sequence.
        let mut cursors = vec![0usize; groups.len()];
        let rebuilt: Vec<Position> = ordinals
            .iter()
            .map(|&ordinal| {
                let bucket = ordinal as usize - 1;
                let pos = groups[bucket][cursors[bucket]];
                cursors[bucket] += 1;
                pos
            })
            .collect();
        assert_eq!(rebuilt, positions);
    }
}

#[test]
fn test_grouping_alternating_pointers() {
    let m = FtMatch::with_pointers(
        ScanEntry::from_record(&[4, 10, 11, 20, 21]).unwrap(),
        Pointers::new(2, vec![1, 2, 1, 2]),
    )
    .unwrap();

    let groups = group_by_token(m).unwrap();
    assert_eq!(groups, vec![vec![10, 20], vec![11, 21]]);
}

#[test]
fn test_degenerate_record_never_merges() {
    for window in [-1, 0, 1] {
        let empty = FtMatch::from_scan(ScanEntry::from_record(&[5]).unwrap(), 1);
        assert!(merge(empty, token(5, &[1, 2], 2), window).is_none());
    }
}

#[test]
fn test_cursor_is_idempotent_after_exhaustion() {
    let mut m = token(1, &[2, 3], 1);
    let mut seen = Vec::new();
    while m.has_next() {
        seen.push(m.current());
    }
    assert_eq!(seen, vec![2, 3]);

    for _ in 0..10 {
        assert!(!m.has_next());
    }
    assert_eq!(m.try_current(), None);
    assert_eq!(m.try_current_pointer(), None);
}

#[test]
fn test_chained_phrase_fold() {
    // "a b c d" occurring at 7..=10, with distractors.
    let a = token(2, &[1, 7], 1);
    let b = token(2, &[8, 15], 2);
    let c = token(2, &[3, 9], 3);
    let d = token(2, &[10], 4);

    let ab = merge(a, b, 1).unwrap();
    let abc = merge(ab, c, 1).unwrap();
    let abcd = merge(abc, d, 1).unwrap();

    assert_eq!(abcd.positions(), &[9, 10]);
    assert_eq!(abcd.lead_pointer(), Some(4));
    assert_eq!(
        group_by_token(abcd).unwrap(),
        vec![vec![], vec![], vec![9], vec![10]]
    );
}
