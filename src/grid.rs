use crate::error::{Error, Result};
use crate::C;
use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::{info, trace};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Orthogonal offsets in the order neighbours are reported: east, south, west, north.
/// The order is fixed so that tie-breaking during search is reproducible.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// A read-only view of a single cell, as handed to renderers by [Grid::cells].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub point: Point,
    pub is_obstacle: bool,
    pub is_start: bool,
    pub is_end: bool,
}

/// [Grid] stores the obstacle flags of a fixed `width x height` area in a [BoolGrid], where an
/// occupied cell is [true] and a free cell is [false], together with the optional start and end
/// designations. Free cells are additionally grouped into connected components with a
/// [UnionFind] structure so that unreachable goals can be rejected without searching.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: BoolGrid,
    start: Option<Point>,
    end: Option<Point>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Grid {
    /// Creates an empty grid without obstacles or designations.
    pub fn new(width: usize, height: usize) -> Grid {
        let mut grid = Grid {
            cells: BoolGrid::new(width, height, false),
            start: None,
            end: None,
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width()
            && (point.y as usize) < self.height()
    }

    /// Converts raw coordinates into a [Point], failing with [Error::OutOfBounds] if they fall
    /// outside the grid.
    pub fn check_bounds(&self, x: i32, y: i32) -> Result<Point> {
        let point = Point::new(x, y);
        if self.in_bounds(&point) {
            Ok(point)
        } else {
            Err(Error::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    fn ix(&self, point: &Point) -> usize {
        point.y as usize * self.width() + point.x as usize
    }

    /// Obstacle flag of a cell. Cells outside the grid are reported as free; use
    /// [can_move_to](Self::can_move_to) to test traversability.
    pub fn is_obstacle(&self, point: &Point) -> bool {
        self.in_bounds(point) && self.cells.get(point.x, point.y)
    }

    /// Whether a search may step onto `point`: it has to be inside the grid and free.
    pub fn can_move_to(&self, point: &Point) -> bool {
        self.in_bounds(point) && !self.cells.get(point.x, point.y)
    }

    /// Sets the obstacle flag of a cell to exactly `value`. Joins newly connected components when
    /// a cell is freed and flags the components as dirty when a cell becomes blocked, since that
    /// can split a component apart.
    pub fn set_obstacle(&mut self, x: i32, y: i32, value: bool) -> Result<()> {
        let point = self.check_bounds(x, y)?;
        if value {
            if !self.cells.get(x, y) {
                self.components_dirty = true;
            }
        } else {
            let point_ix = self.ix(&point);
            for n in self.neighbors(&point) {
                let n_ix = self.ix(&n);
                self.components.union(point_ix, n_ix);
            }
        }
        self.cells.set(x, y, value);
        trace!("Obstacle at {} set to {}", point, value);
        Ok(())
    }

    /// Flips the obstacle flag of a cell and returns the new value.
    pub fn toggle_obstacle(&mut self, x: i32, y: i32) -> Result<bool> {
        let point = self.check_bounds(x, y)?;
        let value = !self.is_obstacle(&point);
        self.set_obstacle(x, y, value)?;
        Ok(value)
    }

    /// Designates the start cell, replacing any earlier designation. The cell may be an obstacle.
    pub fn set_start(&mut self, x: i32, y: i32) -> Result<()> {
        let point = self.check_bounds(x, y)?;
        trace!("Start set to {}", point);
        self.start = Some(point);
        Ok(())
    }

    /// Designates the end cell, replacing any earlier designation. The cell may be an obstacle.
    pub fn set_end(&mut self, x: i32, y: i32) -> Result<()> {
        let point = self.check_bounds(x, y)?;
        trace!("End set to {}", point);
        self.end = Some(point);
        Ok(())
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Free, in-bounds orthogonal neighbours of `point` in the order east, south, west, north.
    pub fn neighbors(&self, point: &Point) -> SmallVec<[Point; 4]> {
        NEUMANN_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.can_move_to(p))
            .collect()
    }

    /// Same as [neighbors](Self::neighbors), paired with the unit step cost.
    pub fn neighbors_and_cost(&self, point: &Point) -> SmallVec<[(Point, i32); 4]> {
        self.neighbors(point).into_iter().map(|p| (p, C)).collect()
    }

    /// Removes every obstacle and both designations. Paths and playback state held elsewhere are
    /// left untouched.
    pub fn clear(&mut self) {
        self.cells = BoolGrid::new(self.width(), self.height(), false);
        self.start = None;
        self.end = None;
        self.generate_components();
    }

    /// Iterates over all cells row by row, starting at the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width() as i32;
        let height = self.height() as i32;
        (0..height).flat_map(move |y| {
            (0..width).map(move |x| {
                let point = Point::new(x, y);
                Cell {
                    point,
                    is_obstacle: self.cells.get(x, y),
                    is_start: self.start == Some(point),
                    is_end: self.end == Some(point),
                }
            })
        })
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells().filter(|c| c.is_obstacle).count()
    }

    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Checks whether `goal` can be reached from `start` according to the connected components.
    /// Only meaningful while the components are clean, see [update](Self::update).
    ///
    /// The start is traversable even when flagged as an obstacle, in which case it belongs to
    /// the component of any of its free neighbours.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        if !self.in_bounds(start) || !self.in_bounds(goal) {
            return false;
        }
        if start == goal {
            return true;
        }
        if self.is_obstacle(goal) {
            return false;
        }
        let goal_ix = self.ix(goal);
        if self.is_obstacle(start) {
            self.neighbors(start)
                .iter()
                .any(|n| self.components.equiv(self.ix(n), goal_ix))
        } else {
            self.components.equiv(self.ix(start), goal_ix)
        }
    }

    /// Checks whether `goal` cannot be reached from `start`.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free orthogonal neighbours into the
    /// same components.
    pub fn generate_components(&mut self) {
        let w = self.width() as i32;
        let h = self.height() as i32;
        self.components = UnionFind::new((w * h) as usize);
        self.components_dirty = false;
        for x in 0..w {
            for y in 0..h {
                let point = Point::new(x, y);
                if !self.can_move_to(&point) {
                    continue;
                }
                let parent_ix = self.ix(&point);
                for p in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.can_move_to(&p) {
                        let ix = self.ix(&p);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| {
                    let p = Point::new(x, y);
                    if self.start == Some(p) {
                        'S'
                    } else if self.end == Some(p) {
                        'G'
                    } else if self.cells.get(x, y) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
