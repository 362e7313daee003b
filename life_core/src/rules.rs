// rules.rs - Conway's B3/S23 transition over a bounded board

use crate::grid::{CellState, Generation, GridState};

/// Relative offsets of the Moore neighbourhood.
#[rustfmt::skip]
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Neighbour positions of (x, y) that lie on the board. Positions past an
/// edge simply do not exist: corners yield 3, edges 5, interior cells 8.
pub fn neighbor_positions(
    width: usize,
    height: usize,
    x: usize,
    y: usize,
) -> impl Iterator<Item = (usize, usize)> {
    OFFSETS.iter().filter_map(move |&(dx, dy)| {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < width && ny < height).then_some((nx, ny))
    })
}

/// Counts live neighbours of (x, y) in `cells`. Never counts the cell itself.
pub fn count_live_neighbors(cells: &Generation, x: usize, y: usize) -> u8 {
    neighbor_positions(cells.width(), cells.height(), x, y)
        .filter(|&(nx, ny)| cells.at(nx, ny).is_alive())
        .count() as u8
}

pub fn next_cell_state(current: CellState, live_neighbors: u8) -> CellState {
    match (current, live_neighbors) {
        (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive, // Survival
        (CellState::Dead, 3) => CellState::Alive,                          // Birth
        _ => CellState::Dead, // Under/overpopulation or stays dead
    }
}

/// Computes the successor of the board's current generation.
///
/// Every cell is evaluated against the same snapshot and written into a
/// separate buffer, so no cell ever sees a neighbour's already-updated value.
pub fn compute_next_generation(grid: &GridState) -> Generation {
    let snapshot = grid.current();
    let mut next = Generation::dead(snapshot.width(), snapshot.height());
    compute_next_generation_into(snapshot, &mut next);
    next
}

/// Same as [`compute_next_generation`], but overwrites `next` (resized to
/// match `snapshot`) instead of allocating.
pub fn compute_next_generation_into(snapshot: &Generation, next: &mut Generation) {
    let (width, height) = (snapshot.width(), snapshot.height());
    next.reshape(width, height);
    for y in 0..height {
        for x in 0..width {
            let count = count_live_neighbors(snapshot, x, y);
            next.put(x, y, next_cell_state(snapshot.at(x, y), count));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(width: usize, height: usize, alive: &[(usize, usize)]) -> GridState {
        let mut grid = GridState::new(width, height).unwrap();
        for &(x, y) in alive {
            grid.set(x, y, CellState::Alive).unwrap();
        }
        grid
    }

    #[test]
    fn corners_edges_and_interior_have_3_5_8_candidates() {
        let (w, h) = (6, 4);
        for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
            assert_eq!(neighbor_positions(w, h, x, y).count(), 3, "corner ({x}, {y})");
        }
        for (x, y) in [(2, 0), (2, h - 1), (0, 2), (w - 1, 1)] {
            assert_eq!(neighbor_positions(w, h, x, y).count(), 5, "edge ({x}, {y})");
        }
        for (x, y) in [(1, 1), (3, 2), (w - 2, h - 2)] {
            assert_eq!(neighbor_positions(w, h, x, y).count(), 8, "interior ({x}, {y})");
        }
    }

    #[test]
    fn cell_is_never_its_own_neighbor() {
        for y in 0..4 {
            for x in 0..5 {
                assert!(neighbor_positions(5, 4, x, y).all(|p| p != (x, y)));
            }
        }
    }

    #[test]
    fn fully_alive_board_counts_reflect_bounds() {
        let mut grid = GridState::new(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                grid.set(x, y, CellState::Alive).unwrap();
            }
        }
        let cells = grid.current();
        assert_eq!(count_live_neighbors(cells, 0, 0), 3);
        assert_eq!(count_live_neighbors(cells, 3, 3), 3);
        assert_eq!(count_live_neighbors(cells, 1, 0), 5);
        assert_eq!(count_live_neighbors(cells, 0, 2), 5);
        assert_eq!(count_live_neighbors(cells, 1, 1), 8);
    }

    #[test]
    fn no_wraparound_across_edges() {
        // Live cells on the far column must not count for column 0.
        let grid = board(5, 3, &[(4, 0), (4, 1), (4, 2)]);
        assert_eq!(count_live_neighbors(grid.current(), 0, 1), 0);
    }

    #[test]
    fn rule_table() {
        use CellState::{Alive, Dead};
        for n in 0..=8u8 {
            let survives = matches!(n, 2 | 3);
            assert_eq!(next_cell_state(Alive, n), CellState::from(survives), "alive, n={n}");
            assert_eq!(next_cell_state(Dead, n), CellState::from(n == 3), "dead, n={n}");
        }
    }

    #[test]
    fn update_is_synchronous() {
        // An L-tromino becomes a block.
        let grid = board(4, 4, &[(0, 0), (0, 1), (1, 1)]);
        let next = compute_next_generation(&grid);
        assert_eq!(next.live_count(), 4);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(next.get(x, y), Some(CellState::Alive));
        }
    }

    #[test]
    fn stale_contents_of_the_target_buffer_are_overwritten() {
        let grid = board(4, 4, &[(0, 0), (0, 1), (1, 1)]);
        let mut target = Generation::dead(2, 9);
        target.put(1, 8, CellState::Alive);
        compute_next_generation_into(grid.current(), &mut target);
        assert_eq!(target, compute_next_generation(&grid));
    }

    #[test]
    fn computing_does_not_touch_the_board() {
        let grid = board(3, 3, &[(1, 1)]);
        let _ = compute_next_generation(&grid);
        assert_eq!(grid.get(1, 1).unwrap(), CellState::Alive);
        assert_eq!(grid.generation(), 0);
    }
}
