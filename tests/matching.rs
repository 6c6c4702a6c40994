use montage::{
    collect_candidates, find_closest, Color, MontageError, Palette, PaletteEntry, PaletteIndex,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Palette that yields entries in exactly the given order.
struct Ordered(Vec<(&'static str, Color)>);

impl PaletteIndex for Ordered {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn entries(&self) -> impl Iterator<Item = PaletteEntry<'_>> + '_ {
        self.0.iter().map(|&(id, color)| PaletteEntry { id, color })
    }
}

fn gray(v: u8) -> Color {
    Color::new(v, v, v)
}

#[test]
fn picks_nearer_donor_with_tolerance() {
    let palette: Palette = [("a", gray(0)), ("b", gray(255))].into_iter().collect();
    let mut rng = StdRng::seed_from_u64(1);

    let found = find_closest(gray(10), &palette, 50.0, &mut rng).unwrap();
    assert_eq!(found.id, "a");
    assert!((found.distance - 17.3205).abs() < 1e-3);

    let reversed = Ordered(vec![("b", gray(255)), ("a", gray(0))]);
    let found = find_closest(gray(10), &reversed, 50.0, &mut rng).unwrap();
    assert_eq!(found.id, "a");
}

#[test]
fn empty_index_fails_fast() {
    let palette = Palette::new();
    let mut rng = StdRng::seed_from_u64(2);
    for tolerance in [0.0, 5.0] {
        assert_eq!(
            find_closest(gray(0), &palette, tolerance, &mut rng),
            Err(MontageError::EmptyIndex)
        );
    }
    let map: HashMap<String, Color> = HashMap::new();
    assert_eq!(
        collect_candidates(gray(0), &map, 0.0),
        Err(MontageError::EmptyIndex)
    );
}

#[test]
fn rejects_invalid_tolerance() {
    let palette: Palette = [("a", gray(0))].into_iter().collect();
    for tolerance in [-1.0, f64::NAN, f64::INFINITY] {
        let err = collect_candidates(gray(0), &palette, tolerance).err().unwrap();
        assert!(matches!(err, MontageError::InvalidTolerance { .. }));
    }
}

#[test]
fn exact_ties_accumulate() {
    let palette = Ordered(vec![
        ("low", Color::new(0, 0, 0)),
        ("far", Color::new(200, 200, 200)),
        ("high", Color::new(20, 0, 0)),
    ]);
    let candidates = collect_candidates(Color::new(10, 0, 0), &palette, 0.0).unwrap();
    assert_eq!(candidates.ids(), &["low", "high"]);
    assert_eq!(candidates.distance(), 10.0);
}

#[test]
fn ties_accumulate_even_with_tolerance() {
    let palette = Ordered(vec![
        ("low", Color::new(0, 0, 0)),
        ("high", Color::new(20, 0, 0)),
    ]);
    let candidates = collect_candidates(Color::new(10, 0, 0), &palette, 25.0).unwrap();
    assert_eq!(candidates.ids(), &["low", "high"]);
}

#[test]
fn entries_inside_tolerance_band_are_not_accumulated() {
    // 12 is within 10 + 5 of the best but neither replaces nor ties it.
    let palette = Ordered(vec![
        ("best", Color::new(10, 0, 0)),
        ("near", Color::new(12, 0, 0)),
    ]);
    let candidates = collect_candidates(Color::new(0, 0, 0), &palette, 5.0).unwrap();
    assert_eq!(candidates.ids(), &["best"]);
    assert_eq!(candidates.distance(), 10.0);
}

#[test]
fn tolerance_blocks_small_improvements() {
    // "closer" improves by 2 but must improve by more than 5 to replace.
    let palette = Ordered(vec![
        ("first", Color::new(10, 0, 0)),
        ("closer", Color::new(8, 0, 0)),
    ]);
    let candidates = collect_candidates(Color::new(0, 0, 0), &palette, 5.0).unwrap();
    assert_eq!(candidates.ids(), &["first"]);

    let candidates = collect_candidates(Color::new(0, 0, 0), &palette, 0.0).unwrap();
    assert_eq!(candidates.ids(), &["closer"]);
    assert_eq!(candidates.distance(), 8.0);
}

#[test]
fn exact_match_always_wins() {
    let query = Color::new(40, 90, 140);
    let palette = Ordered(vec![
        ("near", Color::new(41, 90, 140)),
        ("exact", query),
        ("other", Color::new(0, 0, 0)),
    ]);
    let mut rng = StdRng::seed_from_u64(3);
    for tolerance in [0.0, 0.5, 3.0, 100.0] {
        let found = find_closest(query, &palette, tolerance, &mut rng).unwrap();
        assert_eq!(found.id, "exact");
        assert_eq!(found.distance, 0.0);
    }
}

#[test]
fn duplicate_colors_are_both_candidates() {
    let palette: Palette = [("x", gray(100)), ("y", gray(100)), ("z", gray(10))]
        .into_iter()
        .collect();
    let candidates = collect_candidates(gray(90), &palette, 0.0).unwrap();
    let mut ids = candidates.ids().to_vec();
    ids.sort_unstable();
    assert_eq!(ids, vec!["x", "y"]);
}

#[test]
fn random_choice_covers_all_ties() {
    let palette: Palette = [("x", gray(100)), ("y", gray(100))].into_iter().collect();
    let mut rng = StdRng::seed_from_u64(4);
    let mut seen_x = false;
    let mut seen_y = false;
    for _ in 0..200 {
        match find_closest(gray(100), &palette, 0.0, &mut rng).unwrap().id {
            "x" => seen_x = true,
            "y" => seen_y = true,
            other => panic!("unexpected donor {other}"),
        }
    }
    assert!(seen_x && seen_y);
}

#[test]
fn result_never_exceeds_brute_force_minimum_without_tolerance() {
    let mut rng = StdRng::seed_from_u64(5);
    let palette: Palette = (0..64)
        .map(|i| {
            let c = Color::new(rng.random(), rng.random(), rng.random());
            (format!("donor-{i}"), c)
        })
        .collect();

    for _ in 0..50 {
        let query = Color::new(rng.random(), rng.random(), rng.random());
        let min = palette
            .entries()
            .map(|e| montage::euclidean_distance(query, e.color))
            .fold(f64::INFINITY, f64::min);
        let found = find_closest(query, &palette, 0.0, &mut rng).unwrap();
        assert_eq!(found.distance, min);
    }
}
