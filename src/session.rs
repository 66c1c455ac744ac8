//! An owned editing-and-replay context: the grid being edited, the selected tool, the last
//! computed route and its playback. A UI forwards clicks and button presses here and calls
//! [Session::update] from its frame loop.

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::path::Path;
use crate::playback::{Phase, Playback, PlaybackEvent};
use crate::solver::{astar::AstarSolver, GridSolver};
use core::fmt;
use log::{debug, info};
use std::time::Instant;

/// What a click on the grid does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Designates the clicked cell as start.
    Start,
    /// Designates the clicked cell as end.
    End,
    /// Flips the obstacle flag of the clicked cell.
    Obstacle,
}

/// User-facing status line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Ready,
    MissingEndpoints,
    NoPath,
    Delivering,
    Delivered,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self {
            Status::Ready => "Ready",
            Status::MissingEndpoints => "Set a start and an end first",
            Status::NoPath => "No path",
            Status::Delivering => "Delivering",
            Status::Delivered => "Delivered",
        };
        f.write_str(message)
    }
}

/// Result of [Session::run].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Start or end is not designated; nothing happened.
    MissingEndpoints,
    /// The obstacles separate start and end.
    NoPath,
    /// A route with the given number of cells is being replayed.
    Started(usize),
}

#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    playback: Playback,
    solver: AstarSolver,
    tool: Option<Tool>,
    path: Option<Path>,
    status: Status,
    last_step: Option<Instant>,
}

impl Default for Session {
    fn default() -> Session {
        Session::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Session {
        Session {
            grid: Grid::new(config.width, config.height),
            playback: Playback::new(config.celebration),
            solver: AstarSolver::new(),
            tool: None,
            path: None,
            status: Status::Ready,
            last_step: None,
            config,
        }
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = Some(tool);
    }

    pub fn tool(&self) -> Option<Tool> {
        self.tool
    }

    /// Applies the selected tool to a cell. Clicks outside the grid fail with
    /// [Error::OutOfBounds], which callers are free to ignore; without a tool nothing happens.
    pub fn click(&mut self, x: i32, y: i32) -> Result<()> {
        self.grid.check_bounds(x, y)?;
        match self.tool {
            Some(Tool::Start) => self.grid.set_start(x, y),
            Some(Tool::End) => self.grid.set_end(x, y),
            Some(Tool::Obstacle) => self.grid.toggle_obstacle(x, y).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Grid access for programmatic editing, bypassing the tool selection.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Searches a route between the designated start and end and starts replaying it. Does
    /// nothing unless both are designated.
    pub fn run(&mut self) -> Result<RunOutcome> {
        let (Some(start), Some(end)) = (self.grid.start(), self.grid.end()) else {
            debug!("Run ignored: start or end missing");
            self.status = Status::MissingEndpoints;
            return Ok(RunOutcome::MissingEndpoints);
        };
        self.path = None;
        self.playback.reset();
        self.last_step = None;
        self.grid.update();
        match self.solver.find_path(&self.grid, start, end) {
            Ok(path) => {
                info!("Delivering from {} to {} over {} cells", start, end, path.len());
                self.playback.start(&path);
                let cells = path.len();
                self.path = Some(path);
                self.status = Status::Delivering;
                Ok(RunOutcome::Started(cells))
            }
            Err(Error::NoPathFound { .. }) => {
                self.status = Status::NoPath;
                Ok(RunOutcome::NoPath)
            }
            Err(e) => Err(e),
        }
    }

    /// Clears the grid, the route and the playback.
    pub fn reset(&mut self) {
        info!("Resetting session");
        self.grid.clear();
        self.playback.reset();
        self.path = None;
        self.last_step = None;
        self.status = Status::Ready;
    }

    /// Frame hook. While moving, the playback advances at most once per configured step
    /// interval; the first update after a run only arms the timer. While celebrating every
    /// update is forwarded so that the end of the celebration is noticed.
    pub fn update(&mut self, now: Instant) -> PlaybackEvent {
        match self.playback.phase() {
            Phase::Idle => PlaybackEvent::None,
            Phase::Moving => match self.last_step {
                Some(last) if now.saturating_duration_since(last) < self.config.step_interval => {
                    PlaybackEvent::None
                }
                Some(_) => {
                    self.last_step = Some(now);
                    let event = self.playback.tick(now);
                    if let PlaybackEvent::Arrived(_) = event {
                        self.status = Status::Delivered;
                    }
                    event
                }
                None => {
                    self.last_step = Some(now);
                    PlaybackEvent::None
                }
            },
            Phase::Celebrating => self.playback.tick(now),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// The route of the last successful run.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_util::point::Point;
    use std::time::Duration;

    #[test]
    fn clicks_apply_the_selected_tool() {
        let mut session = Session::default();
        session.click(1, 1).unwrap();
        assert_eq!(session.grid().obstacle_count(), 0);

        session.select_tool(Tool::Obstacle);
        session.click(1, 1).unwrap();
        assert!(session.grid().is_obstacle(&Point::new(1, 1)));
        session.click(1, 1).unwrap();
        assert!(!session.grid().is_obstacle(&Point::new(1, 1)));

        session.select_tool(Tool::Start);
        session.click(0, 0).unwrap();
        session.select_tool(Tool::End);
        session.click(9, 9).unwrap();
        assert_eq!(session.grid().start(), Some(Point::new(0, 0)));
        assert_eq!(session.grid().end(), Some(Point::new(9, 9)));

        assert!(matches!(
            session.click(10, 0),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn run_needs_both_endpoints() {
        let mut session = Session::default();
        session.grid_mut().set_start(0, 0).unwrap();
        assert_eq!(session.run(), Ok(RunOutcome::MissingEndpoints));
        assert_eq!(session.status(), Status::MissingEndpoints);
        assert_eq!(session.playback().phase(), Phase::Idle);
    }

    #[test]
    fn blocked_run_reports_no_path() {
        let mut session = Session::default();
        let grid = session.grid_mut();
        for y in 0..10 {
            grid.set_obstacle(5, y, true).unwrap();
        }
        grid.set_start(0, 0).unwrap();
        grid.set_end(9, 9).unwrap();
        assert_eq!(session.run(), Ok(RunOutcome::NoPath));
        assert_eq!(session.status(), Status::NoPath);
        assert_eq!(session.status().to_string(), "No path");
        assert_eq!(session.path(), None);
        assert_eq!(session.playback().phase(), Phase::Idle);
    }

    #[test]
    fn run_replays_at_the_step_interval() {
        let config = SessionConfig::with_size(5, 5)
            .with_step_interval(Duration::from_millis(100))
            .with_celebration(Duration::from_millis(1000));
        let mut session = Session::new(config);
        session.grid_mut().set_start(0, 0).unwrap();
        session.grid_mut().set_end(2, 0).unwrap();
        assert_eq!(session.run(), Ok(RunOutcome::Started(3)));
        assert_eq!(session.status(), Status::Delivering);

        let t0 = Instant::now();
        assert_eq!(session.update(t0), PlaybackEvent::None);
        assert_eq!(
            session.update(t0 + Duration::from_millis(50)),
            PlaybackEvent::None
        );
        assert_eq!(
            session.update(t0 + Duration::from_millis(100)),
            PlaybackEvent::Stepped(Point::new(1, 0))
        );
        assert_eq!(
            session.update(t0 + Duration::from_millis(150)),
            PlaybackEvent::None
        );
        assert_eq!(
            session.update(t0 + Duration::from_millis(200)),
            PlaybackEvent::Arrived(Point::new(2, 0))
        );
        assert_eq!(session.status(), Status::Delivered);
        assert_eq!(session.playback().phase(), Phase::Celebrating);
        assert_eq!(
            session.update(t0 + Duration::from_millis(900)),
            PlaybackEvent::None
        );
        assert_eq!(
            session.update(t0 + Duration::from_millis(1200)),
            PlaybackEvent::None
        );
        assert_eq!(
            session.update(t0 + Duration::from_millis(1201)),
            PlaybackEvent::Finished
        );
        assert_eq!(session.playback().phase(), Phase::Idle);
    }

    #[test]
    fn reset_clears_grid_and_playback() {
        let mut session = Session::default();
        session.grid_mut().set_start(0, 0).unwrap();
        session.grid_mut().set_end(3, 3).unwrap();
        session.grid_mut().set_obstacle(1, 1, true).unwrap();
        session.run().unwrap();
        session.reset();
        assert_eq!(session.grid().start(), None);
        assert_eq!(session.grid().obstacle_count(), 0);
        assert_eq!(session.path(), None);
        assert_eq!(session.playback().phase(), Phase::Idle);
        assert_eq!(session.playback().current_position(), None);
        assert_eq!(session.status(), Status::Ready);
    }
}
