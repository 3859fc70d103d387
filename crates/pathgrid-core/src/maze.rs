//! Maze generation with a randomized depth-first backtracker.

use rand::prelude::*;

use crate::cell::CellId;
use crate::geom::Coord;
use crate::grid::{Grid, GridMode};

impl Grid {
    /// Carve a perfect maze into this grid.
    ///
    /// Every wall is sealed, then a random depth-first walk from the start
    /// cell carves one passage into each unvisited cell, backtracking through
    /// an explicit stack when it reaches a dead end. The carved passages form
    /// a spanning tree, so every cell is reachable from `(0, 0)` by exactly
    /// one route.
    ///
    /// Obstacles are cleared and the grid switches to [`GridMode::Maze`].
    /// Search metadata and visited flags are reset afterwards; only the walls
    /// persist.
    pub fn generate_maze<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.reset_all();
        self.seal_all_walls();
        for k in 0..self.cell_count() {
            self.cell_mut(CellId(k)).blocked = false;
        }
        self.set_mode(GridMode::Maze);

        let start = self.start();
        self.cell_mut(start).visited = true;
        let mut stack = vec![start];
        let mut current = start;
        let mut unvisited: Vec<CellId> = Vec::with_capacity(4);

        loop {
            self.cell_mut(current).visited = true;

            unvisited.clear();
            unvisited.extend(
                self.cell(current)
                    .neighbours()
                    .iter()
                    .copied()
                    .filter(|&n| !self.cell(n).visited),
            );

            if !unvisited.is_empty() {
                let next = unvisited[rng.random_range(0..unvisited.len())];
                self.cell_mut(next).visited = true;
                stack.push(current);
                let carved = self.remove_wall_between(current, next);
                debug_assert!(carved.is_ok(), "neighbours are always adjacent");
                current = next;
            } else if let Some(prev) = stack.pop() {
                current = prev;
            } else {
                break;
            }
        }

        self.reset_all();
        log::debug!(
            "carved {}x{} maze with {} passages",
            self.rows(),
            self.cols(),
            self.passages().count()
        );
    }

    /// Every open internal edge, reported once as `(cell, east-or-south
    /// neighbour)`.
    pub fn passages(&self) -> impl Iterator<Item = (CellId, CellId)> + '_ {
        self.iter().flat_map(move |(id, cell)| {
            let c = cell.coord();
            let east = self.id(Coord::new(c.i, c.j + 1));
            let south = self.id(Coord::new(c.i + 1, c.j));
            [east, south]
                .into_iter()
                .flatten()
                .filter(move |&n| self.is_open_between(id, n))
                .map(move |n| (id, n))
        })
    }
}
