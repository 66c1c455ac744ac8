//! Error types shared by the grid, the solvers and the session.

use grid_util::point::Point;
use thiserror::Error;

/// Errors reported by the grid model and the pathfinder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A coordinate lies outside `[0, width) x [0, height)`.
    #[error("cell ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// The search exhausted the frontier without reaching the goal. This is a normal outcome
    /// under the current obstacles, not a fault.
    #[error("no path from {start} to {goal}")]
    NoPathFound { start: Point, goal: Point },
}

pub type Result<T> = std::result::Result<T, Error>;
