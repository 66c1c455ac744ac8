//! Step-wise replay of a computed [Path].
//!
//! [Playback] is driven entirely by its caller: every [tick](Playback::tick) advances the drone by
//! at most one cell, and the only notion of time is the `now` passed in, which decides when the
//! celebration after arrival is over.

use crate::path::{is_orthogonal_step, Path};
use grid_util::point::Point;
use log::{debug, trace};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long the arrival celebration lasts unless configured otherwise.
pub const DEFAULT_CELEBRATION: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Idle,
    Moving,
    Celebrating,
}

/// What a single [tick](Playback::tick) did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Nothing changed.
    None,
    /// The drone moved onto the given cell and has more cells ahead.
    Stepped(Point),
    /// The drone reached the goal; the celebration has started.
    Arrived(Point),
    /// The celebration is over and the controller is idle again.
    Finished,
}

#[derive(Clone, Debug)]
pub struct Playback {
    remaining: VecDeque<Point>,
    current_position: Option<Point>,
    visited: Vec<Point>,
    phase: Phase,
    celebration_started: Option<Instant>,
    celebration: Duration,
}

impl Default for Playback {
    fn default() -> Playback {
        Playback::new(DEFAULT_CELEBRATION)
    }
}

impl Playback {
    pub fn new(celebration: Duration) -> Playback {
        Playback {
            remaining: VecDeque::new(),
            current_position: None,
            visited: Vec::new(),
            phase: Phase::Idle,
            celebration_started: None,
            celebration,
        }
    }

    /// Begins replaying `path`, abandoning whatever was playing before. An empty path leaves the
    /// controller idle.
    ///
    /// # Panics
    ///
    /// Panics if consecutive cells of `path` are not exactly one orthogonal step apart. Paths
    /// produced by the solvers always satisfy this.
    pub fn start(&mut self, path: &Path) {
        self.reset();
        let Some((&first, rest)) = path.cells().split_first() else {
            return;
        };
        assert!(
            path.is_contiguous(),
            "playback requires a contiguous path, got {:?}",
            path.cells()
        );
        self.current_position = Some(first);
        self.remaining = rest.iter().copied().collect();
        self.visited.push(first);
        self.phase = Phase::Moving;
        debug!("Playback started at {} with {} steps", first, rest.len());
    }

    /// Advances the state machine by at most one cell.
    ///
    /// In [Phase::Moving] the next cell becomes the current position; once the last cell is
    /// reached the celebration starts at `now`. In [Phase::Celebrating] the controller returns to
    /// [Phase::Idle] on the first tick after the celebration duration has passed. Idle ticks do nothing.
    pub fn tick(&mut self, now: Instant) -> PlaybackEvent {
        match self.phase {
            Phase::Idle => PlaybackEvent::None,
            Phase::Moving => {
                if let Some(next) = self.remaining.pop_front() {
                    if let Some(current) = self.current_position {
                        debug_assert!(is_orthogonal_step(&current, &next));
                    }
                    trace!("Drone moved to {}", next);
                    self.current_position = Some(next);
                    self.visited.push(next);
                }
                if self.remaining.is_empty() {
                    self.phase = Phase::Celebrating;
                    self.celebration_started = Some(now);
                    debug!("Drone arrived after {} cells", self.visited.len());
                    match self.current_position {
                        Some(goal) => PlaybackEvent::Arrived(goal),
                        None => PlaybackEvent::None,
                    }
                } else {
                    match self.current_position {
                        Some(p) => PlaybackEvent::Stepped(p),
                        None => PlaybackEvent::None,
                    }
                }
            }
            Phase::Celebrating => match self.celebration_elapsed(now) {
                Some(elapsed) if elapsed > self.celebration => {
                    self.phase = Phase::Idle;
                    self.celebration_started = None;
                    debug!("Celebration finished");
                    PlaybackEvent::Finished
                }
                _ => PlaybackEvent::None,
            },
        }
    }

    /// Stops playback and forgets the route, the trail and the drone position.
    pub fn reset(&mut self) {
        self.remaining.clear();
        self.visited.clear();
        self.current_position = None;
        self.celebration_started = None;
        self.phase = Phase::Idle;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_position(&self) -> Option<Point> {
        self.current_position
    }

    /// Cells already traversed, in order, starting with the first cell of the path.
    pub fn visited(&self) -> &[Point] {
        &self.visited
    }

    /// Cells still ahead of the drone, in order.
    pub fn remaining(&self) -> impl ExactSizeIterator<Item = &Point> + '_ {
        self.remaining.iter()
    }

    pub fn celebration(&self) -> Duration {
        self.celebration
    }

    /// Time spent celebrating so far, or [None] outside [Phase::Celebrating].
    pub fn celebration_elapsed(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            Phase::Celebrating => self
                .celebration_started
                .map(|started| now.saturating_duration_since(started)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path(len: i32) -> Path {
        Path::from((0..len).map(|x| Point::new(x, 0)).collect::<Vec<_>>())
    }

    #[test]
    fn five_cell_path_plays_through() {
        let t0 = Instant::now();
        let mut playback = Playback::default();
        playback.start(&straight_path(5));
        assert_eq!(playback.phase(), Phase::Moving);
        assert_eq!(playback.current_position(), Some(Point::new(0, 0)));
        assert_eq!(playback.visited(), &[Point::new(0, 0)]);
        assert_eq!(playback.remaining().len(), 4);

        for x in 1..4 {
            assert_eq!(playback.tick(t0), PlaybackEvent::Stepped(Point::new(x, 0)));
            assert_eq!(playback.phase(), Phase::Moving);
        }
        assert_eq!(playback.tick(t0), PlaybackEvent::Arrived(Point::new(4, 0)));
        assert_eq!(playback.phase(), Phase::Celebrating);
        assert_eq!(playback.visited().len(), 5);
        assert_eq!(playback.remaining().len(), 0);

        assert_eq!(
            playback.tick(t0 + Duration::from_millis(2999)),
            PlaybackEvent::None
        );
        assert_eq!(playback.phase(), Phase::Celebrating);
        assert_eq!(
            playback.tick(t0 + Duration::from_millis(3000)),
            PlaybackEvent::None
        );
        assert_eq!(playback.phase(), Phase::Celebrating);
        assert_eq!(
            playback.tick(t0 + Duration::from_millis(3001)),
            PlaybackEvent::Finished
        );
        assert_eq!(playback.phase(), Phase::Idle);
        // The drone stays where it landed until reset.
        assert_eq!(playback.current_position(), Some(Point::new(4, 0)));
    }

    #[test]
    fn empty_path_stays_idle() {
        let mut playback = Playback::default();
        playback.start(&Path::default());
        assert_eq!(playback.phase(), Phase::Idle);
        assert_eq!(playback.current_position(), None);
        assert_eq!(playback.tick(Instant::now()), PlaybackEvent::None);
    }

    #[test]
    fn single_cell_path_arrives_on_first_tick() {
        let mut playback = Playback::default();
        playback.start(&straight_path(1));
        assert_eq!(playback.phase(), Phase::Moving);
        assert_eq!(
            playback.tick(Instant::now()),
            PlaybackEvent::Arrived(Point::new(0, 0))
        );
        assert_eq!(playback.visited(), &[Point::new(0, 0)]);
        assert_eq!(playback.phase(), Phase::Celebrating);
    }

    #[test]
    fn reset_abandons_playback() {
        let now = Instant::now();
        let mut playback = Playback::default();
        playback.start(&straight_path(4));
        playback.tick(now);
        playback.reset();
        assert_eq!(playback.phase(), Phase::Idle);
        assert!(playback.visited().is_empty());
        assert_eq!(playback.remaining().len(), 0);
        assert_eq!(playback.current_position(), None);
        assert_eq!(playback.tick(now), PlaybackEvent::None);
    }

    #[test]
    fn restart_replaces_previous_route() {
        let now = Instant::now();
        let mut playback = Playback::default();
        playback.start(&straight_path(3));
        playback.tick(now);
        playback.tick(now);
        assert_eq!(playback.phase(), Phase::Celebrating);
        let other = Path::from_waypoints(&[Point::new(5, 5), Point::new(5, 7)]);
        playback.start(&other);
        assert_eq!(playback.phase(), Phase::Moving);
        assert_eq!(playback.visited(), &[Point::new(5, 5)]);
        assert_eq!(playback.celebration_elapsed(now), None);
    }

    #[test]
    fn celebration_elapsed_is_reported() {
        let t0 = Instant::now();
        let mut playback = Playback::new(Duration::from_millis(500));
        playback.start(&straight_path(2));
        assert_eq!(playback.celebration_elapsed(t0), None);
        playback.tick(t0);
        assert_eq!(
            playback.celebration_elapsed(t0 + Duration::from_millis(200)),
            Some(Duration::from_millis(200))
        );
        assert_eq!(
            playback.tick(t0 + Duration::from_millis(501)),
            PlaybackEvent::Finished
        );
    }

    #[test]
    fn celebration_outlasts_its_exact_duration() {
        let t0 = Instant::now();
        let mut playback = Playback::default();
        playback.start(&straight_path(2));
        assert_eq!(playback.tick(t0), PlaybackEvent::Arrived(Point::new(1, 0)));
        assert_eq!(playback.tick(t0 + DEFAULT_CELEBRATION), PlaybackEvent::None);
        assert_eq!(playback.phase(), Phase::Celebrating);
        assert_eq!(
            playback.tick(t0 + DEFAULT_CELEBRATION + Duration::from_millis(1)),
            PlaybackEvent::Finished
        );
        assert_eq!(playback.phase(), Phase::Idle);
    }

    #[test]
    #[should_panic(expected = "contiguous")]
    fn non_contiguous_path_is_a_bug() {
        let mut playback = Playback::default();
        playback.start(&Path::from(vec![Point::new(0, 0), Point::new(2, 0)]));
    }
}
