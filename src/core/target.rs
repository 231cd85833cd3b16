//! Shot selection while at least one hit is unresolved.
//!
//! One hit: probe the orthogonal neighbour with the most hit-aware
//! placements. Two or more: settle the orientation and walk the line, filling
//! interior gaps first. `None` means no line cell is shootable and the caller
//! must fall back to [`HuntMode::find_best_shot_with_hits`].
//!
//! [`HuntMode::find_best_shot_with_hits`]: super::hunt::HuntMode::find_best_shot_with_hits

use alloc::vec::Vec;

use super::common::KnowledgeGrid;
use super::coord::{Coordinate, Direction, ORTHOGONAL_STEPS};
use super::probability;

/// Target-mode shot selector over a borrowed knowledge grid.
pub struct TargetMode<'a> {
    grid: &'a KnowledgeGrid,
    remaining: &'a [usize],
}

impl<'a> TargetMode<'a> {
    pub fn new(grid: &'a KnowledgeGrid, remaining: &'a [usize]) -> Self {
        Self { grid, remaining }
    }

    pub fn find_best_target(&self, active_hits: &[Coordinate]) -> Option<Coordinate> {
        match active_hits {
            [] => None,
            [hit] => self.single_hit(*hit),
            hits => self.multiple_hits(hits),
        }
    }

    fn can_shoot(&self, c: Coordinate) -> bool {
        self.grid.is_unknown(c)
    }

    /// Neighbour of `hit` with the highest hit-aware weight; ties go to the
    /// longer open line through `hit`, then to the first direction probed.
    fn single_hit(&self, hit: Coordinate) -> Option<Coordinate> {
        let map = probability::calculate_hit_aware(self.grid, self.remaining, &[hit]);

        let mut best: Option<((u32, usize), Coordinate)> = None;
        for (dx, dy) in ORTHOGONAL_STEPS {
            let Some(neighbor) = hit.offset(dx, dy) else {
                continue;
            };
            if !self.can_shoot(neighbor) {
                continue;
            }
            let key = (
                probability::weight(&map, neighbor),
                self.grid.open_line(hit, dx, dy),
            );
            if best.map_or(true, |(k, _)| key > k) {
                best = Some((key, neighbor));
            }
        }
        best.map(|(_, c)| c)
    }

    fn multiple_hits(&self, hits: &[Coordinate]) -> Option<Coordinate> {
        match determine_orientation(hits) {
            Some(direction) => self.extend_line(hits, direction),
            None => self.mixed_hits(hits),
        }
    }

    /// Walk the line through `hits`: the first unknown cell between the
    /// extremes, then one past the far end, then one before the near end.
    fn extend_line(&self, hits: &[Coordinate], direction: Direction) -> Option<Coordinate> {
        let first = hits[0];
        let along = |c: &Coordinate| match direction {
            Direction::Horizontal => c.x,
            Direction::Vertical => c.y,
        };
        let at = |i: usize| match direction {
            Direction::Horizontal => Coordinate::new(i, first.y),
            Direction::Vertical => Coordinate::new(first.x, i),
        };
        let min = hits.iter().map(along).min()?;
        let max = hits.iter().map(along).max()?;

        if let Some(gap) = (min..=max).map(at).find(|&c| self.can_shoot(c)) {
            return Some(gap);
        }

        let (dx, dy) = direction.step();
        let after = at(max).offset(dx, dy).filter(|&c| self.can_shoot(c));
        let before = at(min).offset(-dx, -dy).filter(|&c| self.can_shoot(c));
        after.or(before)
    }

    /// Hits that do not share one line, most likely two ships in contact.
    /// Work on the largest row group or column group, preferring the row on
    /// a tie; with only singletons, treat the first hit on its own.
    fn mixed_hits(&self, hits: &[Coordinate]) -> Option<Coordinate> {
        let by_row = largest_group(hits, |c| c.y);
        let by_column = largest_group(hits, |c| c.x);

        if by_row.len() >= 2 && by_row.len() >= by_column.len() {
            self.extend_line(&by_row, Direction::Horizontal)
        } else if by_column.len() >= 2 {
            self.extend_line(&by_column, Direction::Vertical)
        } else {
            self.single_hit(hits[0])
        }
    }
}

/// Orientation of the ship behind `hits`, or `None` if they span more than
/// one line.
pub fn determine_orientation(hits: &[Coordinate]) -> Option<Direction> {
    let (first, second) = match hits {
        [first, second, ..] => (*first, *second),
        _ => return None,
    };
    if first.y == second.y && first.x != second.x {
        Some(Direction::Horizontal)
    } else if first.x == second.x && first.y != second.y {
        Some(Direction::Vertical)
    } else if hits.iter().all(|h| h.y == first.y) {
        Some(Direction::Horizontal)
    } else if hits.iter().all(|h| h.x == first.x) {
        Some(Direction::Vertical)
    } else {
        None
    }
}

/// Largest group of `hits` sharing `key`, groups ordered by first
/// appearance; the earliest group wins ties.
fn largest_group<F>(hits: &[Coordinate], key: F) -> Vec<Coordinate>
where
    F: Fn(&Coordinate) -> usize,
{
    let mut groups: Vec<(usize, Vec<Coordinate>)> = Vec::new();
    for hit in hits {
        let k = key(hit);
        match groups.iter_mut().find(|(g, _)| *g == k) {
            Some((_, members)) => members.push(*hit),
            None => groups.push((k, alloc::vec![*hit])),
        }
    }
    let mut best: Vec<Coordinate> = Vec::new();
    for (_, members) in groups {
        if members.len() > best.len() {
            best = members;
        }
    }
    best
}
