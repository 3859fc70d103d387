//! Obstacle layouts built from text.
//!
//! `#` marks a blocked cell; `.`, `S` and `G` mark open cells. Lines are
//! separated by `'\n'` and must all have the same width. Leading and trailing
//! whitespace is trimmed from the whole string but not from individual lines.
//!
//! ```text
//! S.#
//! .##
//! ..G
//! ```

use crate::error::GridError;
use crate::geom::Coord;
use crate::grid::Grid;

impl Grid {
    /// Build an obstacle-mode grid from an ASCII layout.
    ///
    /// The start and goal are still the top-left and bottom-right corners;
    /// `S` and `G` are accepted only as visual markers. A `#` in the start
    /// position is ignored, since the start can never be blocked.
    pub fn parse(layout: &str, cell_size: f32) -> Result<Self, GridError> {
        let layout = layout.trim();
        let mut width: Option<usize> = None;
        let mut blocked = Vec::new();
        let mut rows = 0;

        for (i, line) in layout.lines().enumerate() {
            let mut j = 0;
            for ch in line.chars() {
                match ch {
                    '#' => blocked.push(Coord::new(i, j)),
                    '.' | 'S' | 'G' => {}
                    _ => {
                        return Err(GridError::InvalidRune {
                            ch,
                            coord: Coord::new(i, j),
                        });
                    }
                }
                j += 1;
            }
            match width {
                None => width = Some(j),
                Some(w) if w != j => return Err(GridError::InconsistentLayout { line: i }),
                Some(_) => {}
            }
            rows += 1;
        }

        let mut grid = Grid::new(rows, width.unwrap_or(0), cell_size)?;
        for c in blocked {
            grid.set_blocked(c, true)?;
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
S.#.
.##.
....
#..G";

    #[test]
    fn parse_size_and_blocks() {
        let g = Grid::parse(ROOM, 1.0).unwrap();
        assert_eq!((g.rows(), g.cols()), (4, 4));
        assert!(g.cell_at(Coord::new(0, 2)).unwrap().blocked);
        assert!(g.cell_at(Coord::new(1, 1)).unwrap().blocked);
        assert!(g.cell_at(Coord::new(3, 0)).unwrap().blocked);
        assert!(!g.cell_at(Coord::new(3, 3)).unwrap().blocked);
        assert_eq!(g.cells().iter().filter(|c| c.blocked).count(), 4);
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let g = Grid::parse("\n  \n..\n..\n\n", 1.0).unwrap();
        assert_eq!((g.rows(), g.cols()), (2, 2));
    }

    #[test]
    fn parse_inconsistent_width() {
        assert_eq!(
            Grid::parse("...\n..", 1.0).unwrap_err(),
            GridError::InconsistentLayout { line: 1 }
        );
    }

    #[test]
    fn parse_invalid_rune() {
        assert_eq!(
            Grid::parse("..\n.x", 1.0).unwrap_err(),
            GridError::InvalidRune {
                ch: 'x',
                coord: Coord::new(1, 1)
            }
        );
    }

    #[test]
    fn parse_empty_layout() {
        assert!(matches!(
            Grid::parse("   ", 1.0),
            Err(GridError::EmptyDimensions { .. })
        ));
    }

    #[test]
    fn start_is_never_blocked() {
        let g = Grid::parse("#.\n..", 1.0).unwrap();
        assert!(!g.cell(g.start()).blocked);
    }
}
