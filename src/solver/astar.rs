use grid_util::point::Point;

use crate::{solver::GridSolver, C};

/// Manhattan distance between two cells.
pub fn manhattan_distance(p1: &Point, p2: &Point) -> i32 {
    (p1.x - p2.x).abs() + (p1.y - p2.y).abs()
}

/// A* over the 4-connected unit-cost grid. The Manhattan heuristic is admissible and consistent
/// there, so the first time the goal leaves the frontier its cost is optimal.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        manhattan_distance(p1, p2) * C
    }
}
