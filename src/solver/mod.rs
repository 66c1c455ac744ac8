use crate::astar::astar;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::path::Path;
use grid_util::point::Point;
use log::{debug, info, warn};
use smallvec::SmallVec;

pub mod astar;
pub mod dijkstra;

/// A shortest-path solver over a [Grid]. Implementors choose the heuristic; the search itself
/// is shared.
pub trait GridSolver {
    /// Lower bound on the cost of moving from `p1` to `p2`. Must never overestimate for the
    /// returned paths to be optimal.
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32;

    /// Traversable orthogonal neighbours of `node` with their step cost.
    fn successors(&self, grid: &Grid, node: &Point) -> SmallVec<[(Point, i32); 4]> {
        grid.neighbors_and_cost(node)
    }

    /// Sums the step costs along a path.
    fn get_path_cost(&self, path: &Path) -> i32 {
        path.cost() as i32 * crate::C
    }

    /// Computes a shortest path from `start` to `goal`, both inclusive.
    ///
    /// The start is expanded even when it is flagged as an obstacle. If the grid's connected
    /// components are up to date they are consulted first, so that hopeless searches are
    /// rejected without flood-filling the grid.
    fn find_path(&self, grid: &Grid, start: Point, goal: Point) -> Result<Path> {
        grid.check_bounds(start.x, start.y)?;
        grid.check_bounds(goal.x, goal.y)?;
        if !grid.components_dirty() && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Err(Error::NoPathFound { start, goal });
        }
        let result = astar(
            &start,
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        );
        match result {
            Some((cells, cost)) => {
                debug!("Found path from {} to {} with cost {}", start, goal, cost);
                Ok(Path::from(cells))
            }
            None => {
                if !grid.components_dirty() {
                    warn!("Reachable goal could not be pathed to, are the components correct?");
                }
                info!("No path from {} to {}", start, goal);
                Err(Error::NoPathFound { start, goal })
            }
        }
    }
}
