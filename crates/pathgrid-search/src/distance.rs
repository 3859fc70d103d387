use pathgrid_core::Coord;

/// Euclidean (L2) distance between two grid coordinates.
#[inline]
pub fn euclidean(a: Coord, b: Coord) -> f64 {
    let di = a.i.abs_diff(b.i) as f64;
    let dj = a.j.abs_diff(b.j) as f64;
    di.hypot(dj)
}

/// Manhattan (L1) distance between two grid coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> f64 {
    a.manhattan(b) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_three_four_five() {
        assert_eq!(euclidean(Coord::new(0, 0), Coord::new(3, 4)), 5.0);
        assert_eq!(euclidean(Coord::new(3, 4), Coord::new(0, 0)), 5.0);
    }

    #[test]
    fn euclidean_never_exceeds_manhattan() {
        for i in 0..6 {
            for j in 0..6 {
                let (a, b) = (Coord::new(i, j), Coord::new(5, 2));
                assert!(euclidean(a, b) <= manhattan(a, b));
            }
        }
    }
}
