//! # drone_pathfinding
//!
//! Plans and replays delivery routes on a small obstacle grid. A [Grid] holds the obstacles and
//! the designated start and end cells, [find_path] computes a shortest route with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) guided by the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry), and [Playback] steps a
//! drone along the route one cell per tick before a timed arrival celebration.
//!
//! Movement is 4-directional with unit cost. Connected components of free cells are tracked so
//! that unreachable goals are rejected without flood-filling the grid.
//!
//! ```
//! use drone_pathfinding::{find_path, Grid, Phase, Playback, Point};
//! use std::time::Instant;
//!
//! let mut grid = Grid::new(10, 10);
//! grid.set_obstacle(1, 0, true).unwrap();
//! let path = find_path(&grid, Point::new(0, 0), Point::new(3, 4)).unwrap();
//! assert_eq!(path.len(), 8);
//!
//! let mut playback = Playback::default();
//! playback.start(&path);
//! for _ in 1..path.len() {
//!     playback.tick(Instant::now());
//! }
//! assert_eq!(playback.phase(), Phase::Celebrating);
//! ```
pub mod astar;
pub mod config;
pub mod error;
pub mod grid;
pub mod path;
pub mod playback;
pub mod session;
pub mod solver;

pub use config::SessionConfig;
pub use error::{Error, Result};
pub use grid::{Cell, Grid};
pub use grid_util::point::Point;
pub use path::Path;
pub use playback::{Phase, Playback, PlaybackEvent};
pub use session::{RunOutcome, Session, Status, Tool};
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver};

/// Cost of a single orthogonal step.
pub const C: i32 = 1;

/// Computes a shortest path from `start` to `goal` with [AstarSolver].
///
/// Fails with [Error::NoPathFound] when the obstacles separate the two cells and with
/// [Error::OutOfBounds] when either lies outside the grid.
pub fn find_path(grid: &Grid, start: Point, goal: Point) -> Result<Path> {
    AstarSolver::new().find_path(grid, start, goal)
}
