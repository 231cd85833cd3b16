use salvo::{Coordinate, Direction, Ship, ShipPlacement};

#[test]
fn test_cells_and_mask() {
    let ship = Ship::new(3, Coordinate::new(2, 1), Direction::Vertical);
    let cells: Vec<_> = ship.cells().collect();
    assert_eq!(
        cells,
        vec![Coordinate::new(2, 1), Coordinate::new(2, 2), Coordinate::new(2, 3)]
    );
    for c in cells {
        assert!(ship.mask().get(c.x, c.y).unwrap());
        assert!(ship.contains(c));
    }
    assert!(!ship.contains(Coordinate::new(2, 4)));
}

#[test]
fn test_out_of_bounds_ship() {
    let ship = Ship::new(4, Coordinate::new(8, 0), Direction::Horizontal);
    assert!(!ship.is_in_bounds());
    assert_eq!(ship.cells().count(), 2);

    let fits = Ship::new(4, Coordinate::new(6, 0), Direction::Horizontal);
    assert!(fits.is_in_bounds());
}

#[test]
fn test_hits_and_sinking() {
    let mut ship = Ship::new(2, Coordinate::new(0, 0), Direction::Horizontal);
    assert!(!ship.record_hit(Coordinate::new(0, 1)));
    assert!(ship.record_hit(Coordinate::new(0, 0)));
    assert!(!ship.is_sunk());
    // repeated hits on one cell do not count twice
    assert!(ship.record_hit(Coordinate::new(0, 0)));
    assert_eq!(ship.hit_count(), 1);
    assert!(ship.record_hit(Coordinate::new(1, 0)));
    assert!(ship.is_sunk());
}

#[test]
fn test_halo_excludes_own_cells() {
    let ship = Ship::new(2, Coordinate::new(0, 0), Direction::Vertical);
    let halo: Vec<_> = ship.orthogonal_halo().iter_set_bits().collect();
    assert_eq!(halo, vec![(1, 0), (1, 1), (0, 2)]);
}

#[test]
fn test_placement_round_trip_and_display() {
    let placement = ShipPlacement::new(5, Coordinate::new(3, 4), Direction::Horizontal);
    assert_eq!(placement.to_ship().placement(), placement);
    assert_eq!(placement.to_string(), "size=5 pos=(3,4) dir=horizontal");
    assert_eq!(Direction::Vertical.as_log_str(), "vertical");
}

#[test]
fn test_neighbors_clip_to_board() {
    let corner = Coordinate::new(0, 0);
    assert_eq!(corner.orthogonal_neighbors().count(), 2);
    assert_eq!(corner.all_neighbors().count(), 3);

    let middle = Coordinate::new(4, 4);
    assert_eq!(middle.orthogonal_neighbors().count(), 4);
    let all: Vec<_> = middle.all_neighbors().collect();
    assert_eq!(all.len(), 8);
    assert!(all.contains(&Coordinate::new(5, 5)));
    assert!(!all.contains(&middle));

    assert_eq!(Coordinate::new(9, 5).all_neighbors().count(), 5);
}

#[test]
fn test_orthogonal_neighbor_order() {
    let order: Vec<_> = Coordinate::new(4, 4).orthogonal_neighbors().collect();
    assert_eq!(
        order,
        vec![
            Coordinate::new(3, 4),
            Coordinate::new(5, 4),
            Coordinate::new(4, 3),
            Coordinate::new(4, 5),
        ]
    );
}
