use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use salvo::core::placement::{
    edge_penalty, entropy_bonus, orientation_mix, proximity_penalty, random_layout,
    symmetry_penalty,
};
use salvo::{validate_placements, Coordinate, Direction, PlacementStrategy, Ship, ShipPlacement, FLEET};

fn sizes_of(layout: &[ShipPlacement]) -> Vec<usize> {
    let mut sizes: Vec<usize> = layout.iter().map(|p| p.size).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn random_layout_is_legal(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        if let Some(layout) = random_layout(&mut rng) {
            prop_assert!(validate_placements(&layout));
            prop_assert_eq!(sizes_of(&layout), FLEET.to_vec());
        }
    }

    #[test]
    fn generated_layout_is_legal(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let layout = PlacementStrategy::with_limits(40, 5).generate(&mut rng).unwrap();
        prop_assert_eq!(layout.len(), 10);
        prop_assert!(validate_placements(&layout));
        prop_assert_eq!(sizes_of(&layout), FLEET.to_vec());
    }
}

#[test]
fn test_default_strategy_produces_legal_fleet() {
    let mut rng = SmallRng::seed_from_u64(7);
    let layout = PlacementStrategy::new().generate(&mut rng).unwrap();
    assert!(validate_placements(&layout));
}

#[test]
fn test_generation_is_reproducible_per_seed() {
    let strategy = PlacementStrategy::with_limits(30, 3);
    let a = strategy.generate(&mut SmallRng::seed_from_u64(99)).unwrap();
    let b = strategy.generate(&mut SmallRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
}

fn ship(size: usize, x: usize, y: usize, direction: Direction) -> Ship {
    Ship::new(size, Coordinate::new(x, y), direction)
}

#[test]
fn test_edge_penalty() {
    // outer ring: one point per cell
    assert_eq!(edge_penalty(&[ship(2, 0, 0, Direction::Horizontal)]), 2.0);
    // second ring
    let inner = edge_penalty(&[ship(2, 1, 1, Direction::Horizontal)]);
    assert!((inner - 0.6).abs() < 1e-9);
    assert_eq!(edge_penalty(&[ship(2, 4, 4, Direction::Vertical)]), 0.0);
}

#[test]
fn test_proximity_penalty() {
    let far = [
        ship(2, 0, 0, Direction::Horizontal),
        ship(2, 6, 6, Direction::Horizontal),
    ];
    assert_eq!(proximity_penalty(&far), 0.0);

    // diagonal neighbours: manhattan distance 2, one short of the gap
    let close = [
        ship(2, 0, 0, Direction::Horizontal),
        ship(2, 2, 1, Direction::Horizontal),
    ];
    assert_eq!(proximity_penalty(&close), 1.0);
}

#[test]
fn test_symmetry_penalty_counts_mirrored_cells() {
    // (1,5) mirrors to (9,5) across the vertical centre line
    let mirrored = [
        ship(2, 1, 5, Direction::Vertical),
        ship(2, 9, 5, Direction::Vertical),
    ];
    assert!(symmetry_penalty(&mirrored) > 0.0);
    assert_eq!(symmetry_penalty(&[ship(2, 2, 2, Direction::Horizontal)]), 0.0);
}

#[test]
fn test_orientation_mix() {
    let h = ShipPlacement::new(2, Coordinate::new(0, 0), Direction::Horizontal);
    let v = ShipPlacement::new(2, Coordinate::new(5, 5), Direction::Vertical);
    assert_eq!(orientation_mix(&[h, h]), 0.0);
    assert_eq!(orientation_mix(&[h, v]), 1.5);
    assert_eq!(orientation_mix(&[]), 0.0);
}

#[test]
fn test_entropy_prefers_spread() {
    let tight = [ship(2, 4, 4, Direction::Horizontal), ship(2, 4, 6, Direction::Horizontal)];
    let spread = [ship(2, 0, 0, Direction::Horizontal), ship(2, 8, 9, Direction::Horizontal)];
    assert!(entropy_bonus(&spread) > entropy_bonus(&tight));
}
