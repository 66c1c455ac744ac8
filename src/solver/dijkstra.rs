use grid_util::point::Point;

use crate::solver::GridSolver;

/// Uninformed search; expands nodes purely by distance from the start. Slower than
/// [AstarSolver](super::astar::AstarSolver) but trivially optimal, which makes it a useful
/// reference.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &Point, _: &Point) -> i32 {
        0
    }
}
