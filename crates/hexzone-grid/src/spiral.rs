//! Deterministic spiral numbering of hex cells.
//!
//! Index 1 is the origin. Ring `k` starts at `(0, -k)` and walks the six
//! [`RING_WALK`] directions `k` steps each. Persisted zone ids depend on this
//! exact start cell and direction order; changing either renumbers every
//! stored zone.

use crate::axial::Axial;
use crate::error::GridError;
use crate::ring::MAX_RING;

/// Axial deltas walked around every ring, in order.
///
/// Starting from `(0, -k)` the first side heads east, and each following
/// side turns so the walk stays on ring `k` and closes back on its start.
pub const RING_WALK: [(i32, i32); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

/// Number of cells with ring `<= k`: `1 + 3k(k + 1)`.
#[must_use]
pub fn cells_within(k: u32) -> u64 {
    let k = u64::from(k);
    1 + 3 * k * (k + 1)
}

/// Number of cells with ring `< k`: `1 + 3k(k - 1)` for `k >= 1`, zero for the origin ring.
#[must_use]
pub fn cells_before_ring(k: u32) -> u64 {
    if k == 0 {
        0
    } else {
        cells_within(k - 1)
    }
}

/// First cell visited on ring `k`.
#[must_use]
pub fn ring_start(k: u32) -> Axial {
    let k = k.min(MAX_RING).cast_signed();
    Axial::new(0, -k)
}

/// Cells of ring `k` in walk order. Rings above [`MAX_RING`] are clamped.
#[must_use]
pub fn ring_cells(k: u32) -> RingCells {
    let k = k.min(MAX_RING);
    RingCells {
        k,
        cursor: ring_start(k),
        side: 0,
        step: 0,
        remaining: if k == 0 { 1 } else { 6 * u64::from(k) },
    }
}

#[derive(Debug, Clone)]
pub struct RingCells {
    k: u32,
    cursor: Axial,
    side: usize,
    step: u32,
    remaining: u64,
}

impl Iterator for RingCells {
    type Item = Axial;

    fn next(&mut self) -> Option<Axial> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let cell = self.cursor;
        if self.remaining > 0 {
            let (dq, dr) = RING_WALK[self.side];
            self.cursor = self.cursor.offset(dq, dr);
            self.step += 1;
            if self.step == self.k {
                self.step = 0;
                self.side += 1;
            }
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

/// Every cell with ring `<= k_max`, in index order.
pub fn spiral(k_max: u32) -> impl Iterator<Item = Axial> {
    (0..=k_max.min(MAX_RING)).flat_map(ring_cells)
}

/// Spiral index of a cell.
///
/// # Errors
///
/// Returns [`GridError::IndexNotFound`] when the cell lies past [`MAX_RING`].
pub fn spiral_index(cell: Axial) -> Result<u64, GridError> {
    let k = cell.ring();
    if k == 0 {
        return Ok(1);
    }
    let not_found = GridError::IndexNotFound {
        q: cell.q,
        r: cell.r,
    };
    if k > MAX_RING {
        return Err(not_found);
    }
    let offset = ring_offset(cell, k).ok_or(not_found)?;
    Ok(cells_before_ring(k) + offset + 1)
}

/// Cell at a spiral index. Inverse of [`spiral_index`].
#[must_use]
pub fn axial_at(index: u64) -> Option<Axial> {
    if index == 0 || index > cells_within(MAX_RING) {
        return None;
    }
    let k = ring_of_index(index);
    if k == 0 {
        return Some(Axial::ORIGIN);
    }
    ring_cell_at(k, index - cells_before_ring(k) - 1)
}

/// Position of `cell` along the walk of ring `k`, `k >= 1`.
fn ring_offset(cell: Axial, k: u32) -> Option<u64> {
    let (q, r) = (i64::from(cell.q), i64::from(cell.r));
    let k = i64::from(k);
    let (side, step) = if r == -k && (0..k).contains(&q) {
        (0, q)
    } else if q == k && r < 0 {
        (1, r + k)
    } else if q > 0 && r >= 0 && q + r == k {
        (2, r)
    } else if r == k && q <= 0 && q > -k {
        (3, -q)
    } else if q == -k && r > 0 {
        (4, k - r)
    } else if q < 0 && r <= 0 && q + r == -k {
        (5, -r)
    } else {
        return None;
    };
    u64::try_from(side * k + step).ok()
}

/// Cell at `offset` along the walk of ring `k`, `k >= 1`.
fn ring_cell_at(k: u32, offset: u64) -> Option<Axial> {
    let k64 = u64::from(k);
    let side = usize::try_from(offset / k64).ok()?;
    if side >= RING_WALK.len() {
        return None;
    }
    let step = i32::try_from(offset % k64).ok()?;
    let k = k.cast_signed();
    let (corner_q, corner_r) = match side {
        0 => (0, -k),
        1 => (k, -k),
        2 => (k, 0),
        3 => (0, k),
        4 => (-k, k),
        _ => (-k, 0),
    };
    let (dq, dr) = RING_WALK[side];
    Some(Axial::new(corner_q + dq * step, corner_r + dr * step))
}

/// Smallest `k` with `cells_within(k) >= index`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn ring_of_index(index: u64) -> u32 {
    // Solve 3k^2 + 3k + 1 >= index, then correct for float error.
    let estimate = ((-3.0 + (9.0 + 12.0 * (index - 1) as f64).sqrt()) / 6.0).ceil();
    let mut k = estimate.max(0.0) as u32;
    while k > 0 && cells_within(k - 1) >= index {
        k -= 1;
    }
    while cells_within(k) < index {
        k += 1;
    }
    k
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn origin_is_index_one() {
        assert_eq!(spiral_index(Axial::ORIGIN), Ok(1));
        assert_eq!(axial_at(1), Some(Axial::ORIGIN));
        assert_eq!(axial_at(0), None);
    }

    #[test]
    fn cell_counts_follow_centered_hexagonal_numbers() {
        assert_eq!(cells_within(0), 1);
        assert_eq!(cells_within(1), 7);
        assert_eq!(cells_within(2), 19);
        assert_eq!(cells_within(6), 127);
        assert_eq!(cells_before_ring(0), 0);
        assert_eq!(cells_before_ring(1), 1);
        assert_eq!(cells_before_ring(3), 19);
    }

    #[test]
    fn ring_one_numbering_is_fixed() {
        let expected = [
            (Axial::new(0, -1), 2),
            (Axial::new(1, -1), 3),
            (Axial::new(1, 0), 4),
            (Axial::new(0, 1), 5),
            (Axial::new(-1, 1), 6),
            (Axial::new(-1, 0), 7),
        ];
        for (cell, index) in expected {
            assert_eq!(spiral_index(cell), Ok(index), "{cell}");
        }
    }

    #[test]
    fn ring_two_starts_at_canonical_cell() {
        assert_eq!(spiral_index(Axial::new(0, -2)), Ok(8));
        assert_eq!(spiral_index(Axial::new(1, -2)), Ok(9));
        assert_eq!(spiral_index(Axial::new(-1, -1)), Ok(19));
    }

    #[test]
    fn ring_walk_stays_on_ring_and_closes() {
        for k in 1..=8 {
            let cells: Vec<Axial> = ring_cells(k).collect();
            assert_eq!(cells.len(), 6 * k as usize);
            assert!(cells.iter().all(|c| c.ring() == k));
            for pair in cells.windows(2) {
                assert!(pair[0].is_neighbor(pair[1]));
            }
            let last = cells[cells.len() - 1];
            assert!(last.is_neighbor(ring_start(k)));
        }
    }

    #[test]
    fn spiral_is_a_bijection_up_to_k() {
        const K: u32 = 9;
        let cells: Vec<Axial> = spiral(K).collect();
        assert_eq!(cells.len() as u64, cells_within(K));

        let unique: HashSet<Axial> = cells.iter().copied().collect();
        assert_eq!(unique.len(), cells.len());

        let mut indices = HashSet::new();
        for (position, cell) in cells.iter().enumerate() {
            let index = spiral_index(*cell).unwrap();
            assert_eq!(index, position as u64 + 1);
            assert!(index >= 1 && index <= cells_within(K));
            assert!(indices.insert(index));
            assert_eq!(axial_at(index), Some(*cell));
        }
    }

    #[test]
    fn every_cell_in_range_has_an_index() {
        for q in -6..=6 {
            for r in -6..=6 {
                let cell = Axial::new(q, r);
                if cell.ring() <= 6 {
                    assert!(spiral_index(cell).unwrap() <= cells_within(6));
                }
            }
        }
    }

    #[test]
    fn ring_of_index_hits_boundaries() {
        assert_eq!(ring_of_index(1), 0);
        assert_eq!(ring_of_index(2), 1);
        assert_eq!(ring_of_index(7), 1);
        assert_eq!(ring_of_index(8), 2);
        assert_eq!(ring_of_index(cells_within(500)), 500);
        assert_eq!(ring_of_index(cells_within(500) + 1), 501);
    }

    #[test]
    fn closed_form_matches_the_walk_on_large_rings() {
        for k in [50, 1_000, MAX_RING] {
            let start = cells_before_ring(k) + 1;
            assert_eq!(axial_at(start), Some(ring_start(k)));
            assert_eq!(spiral_index(ring_start(k)), Ok(start));
            let last = cells_within(k);
            let last_cell = axial_at(last).unwrap();
            assert_eq!(last_cell.ring(), k);
            assert!(last_cell.is_neighbor(ring_start(k)));
            assert_eq!(spiral_index(last_cell), Ok(last));
        }
    }

    #[test]
    fn indexing_past_max_ring_fails() {
        let far = Axial::new(0, -(MAX_RING.cast_signed()) - 1);
        assert!(matches!(
            spiral_index(far),
            Err(GridError::IndexNotFound { .. })
        ));
        assert_eq!(axial_at(cells_within(MAX_RING) + 1), None);
    }
}
