//! The skyline problem, solved by sweeping left to right over every x where a
//! building starts or ends. The buildings standing at the sweep line live in
//! a max-first queue keyed by height, and each building's locator is kept in
//! a map so it can be removed in O(log n) when the sweep passes its right
//! edge.

use locator_heap::{Locator, MaxPriorityQueue};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct Building {
    left: u32,
    height: u32,
    right: u32,
}

fn skyline(buildings: &[(u32, u32, u32)]) -> Vec<(u32, u32)> {
    let bs: HashSet<Building> = buildings
        .iter()
        .map(|&(left, height, right)| Building {
            left,
            height,
            right,
        })
        .collect();

    // x -> buildings that start or end there
    let mut xs: BTreeMap<u32, Vec<Building>> = BTreeMap::new();
    for &b in bs.iter() {
        xs.entry(b.left).or_default().push(b);
        xs.entry(b.right).or_default().push(b);
    }

    let mut pq: MaxPriorityQueue<Building, u32> =
        MaxPriorityQueue::with_key(|b: &Building| b.height);
    let mut locs: HashMap<Building, Locator> = HashMap::new();

    let floor = Building {
        left: 0,
        height: 0,
        right: bs.iter().map(|b| b.right).max().unwrap_or(0),
    };
    locs.insert(floor, pq.insert(floor));

    let mut res = vec![(0, 0)];
    for (&x, at_x) in xs.iter() {
        for b in at_x.iter() {
            if x == b.left {
                locs.insert(*b, pq.insert(*b));
            } else if x == b.right {
                let loc = locs.remove(b).expect("building was inserted at its left edge");
                pq.remove(loc).expect("locator is live");
            }
        }
        let height = pq.peek().expect("floor is never removed").height;
        if res.last().map(|&(_, h)| h) != Some(height) {
            res.push((x, height));
        }
    }
    res.split_off(1)
}

/// Recomputes the skyline by scanning every building at every significant x.
fn skyline_brute_force(buildings: &[(u32, u32, u32)]) -> Vec<(u32, u32)> {
    let mut xs: Vec<u32> = buildings.iter().flat_map(|&(l, _, r)| vec![l, r]).collect();
    xs.sort();
    xs.dedup();
    let mut res = vec![(0, 0)];
    for &x in xs.iter() {
        let height = buildings
            .iter()
            .filter(|&&(l, _, r)| l <= x && x < r)
            .map(|&(_, h, _)| h)
            .max()
            .unwrap_or(0);
        if res.last().map(|&(_, h)| h) != Some(height) {
            res.push((x, height));
        }
    }
    res.split_off(1)
}

#[test]
fn uva_105() {
    let input = [
        (1, 11, 5),
        (2, 6, 7),
        (3, 13, 9),
        (12, 7, 16),
        (14, 3, 25),
        (19, 18, 22),
        (23, 13, 29),
        (24, 4, 28),
    ];
    let expected = vec![
        (1, 11),
        (3, 13),
        (9, 0),
        (12, 7),
        (16, 3),
        (19, 18),
        (22, 3),
        (23, 13),
        (29, 0),
    ];
    assert_eq!(skyline(&input), expected);
    assert_eq!(skyline_brute_force(&input), expected);
}

#[test]
fn duplicate_buildings_are_counted_once() {
    let input = [(1, 5, 4), (1, 5, 4), (2, 3, 6)];
    assert_eq!(skyline(&input), vec![(1, 5), (4, 3), (6, 0)]);
}

#[test]
fn no_buildings() {
    assert_eq!(skyline(&[]), vec![]);
}

fn building() -> impl Strategy<Value = (u32, u32, u32)> {
    (0..1000u32, 1..=1000u32).prop_flat_map(|(left, height)| {
        (Just(left), Just(height), left + 1..=1000u32)
    })
}

proptest! {
    #[test]
    fn random_cities_match_brute_force(
        buildings in proptest::collection::vec(building(), 0..300)
    ) {
        prop_assert_eq!(skyline(&buildings), skyline_brute_force(&buildings));
    }
}
