use grid_util::point::Point;
use itertools::Itertools;
use std::ops::Deref;

/// Whether two cells are exactly one orthogonal step apart.
pub fn is_orthogonal_step(a: &Point, b: &Point) -> bool {
    (a.x - b.x).abs() + (a.y - b.y).abs() == 1
}

/// An ordered sequence of cells from start to goal, both inclusive. A path cannot be modified
/// once built; it dereferences to a slice of its cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    cells: Vec<Point>,
}

impl Path {
    /// Turns orthogonally aligned waypoints into a path which can be followed step by step.
    /// Each leg moves along a single axis, so consecutive waypoints must share a row or a column.
    pub fn from_waypoints(waypoints: &[Point]) -> Path {
        let mut cells: Vec<Point> = Vec::new();
        let mut waypoints = waypoints.iter();
        let Some(&first) = waypoints.next() else {
            return Path::default();
        };
        let mut current = first;
        cells.push(current);
        for next in waypoints {
            debug_assert!(
                next.x == current.x || next.y == current.y,
                "waypoints {} and {} are not aligned",
                current,
                next
            );
            let dx = (next.x - current.x).signum();
            let dy = (next.y - current.y).signum();
            while current != *next {
                current = Point::new(current.x + dx, current.y + dy);
                cells.push(current);
            }
        }
        Path { cells }
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn start(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    /// Number of unit steps, one less than the number of cells.
    pub fn cost(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Every consecutive pair of cells differs by exactly one orthogonal step.
    pub fn is_contiguous(&self) -> bool {
        self.cells
            .iter()
            .tuple_windows()
            .all(|(a, b)| is_orthogonal_step(a, b))
    }

    pub fn into_cells(self) -> Vec<Point> {
        self.cells
    }
}

impl Deref for Path {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.cells
    }
}

impl From<Vec<Point>> for Path {
    fn from(cells: Vec<Point>) -> Path {
        Path { cells }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
