//! Terminal replay of a drone delivery.
//!
//! Usage:
//!   cargo run --example drone_delivery
//!   cargo run --example drone_delivery -- --density 0.25 --seed 3
//!   cargo run --example drone_delivery -- --obstacle 5,0 --obstacle 5,1 --goal 9,0

use clap::Parser;
use drone_pathfinding::{
    Phase, PlaybackEvent, Point, RunOutcome, Session, SessionConfig, Tool,
};
use rand::prelude::*;
use std::thread;
use std::time::{Duration, Instant};

/// Plans a route on an obstacle grid and replays it step by step.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 10)]
    width: usize,

    #[arg(long, default_value_t = 10)]
    height: usize,

    /// Start cell as "x,y"
    #[arg(long, default_value = "0,0", value_parser = parse_cell)]
    start: (i32, i32),

    /// Goal cell as "x,y"
    #[arg(long, default_value = "9,9", value_parser = parse_cell)]
    goal: (i32, i32),

    /// Obstacle cell as "x,y"; may be repeated
    #[arg(long, value_parser = parse_cell)]
    obstacle: Vec<(i32, i32)>,

    /// Probability of each remaining cell being an obstacle
    #[arg(long, default_value_t = 0.0)]
    density: f64,

    /// Seed for the random obstacles
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between two drone steps
    #[arg(long, default_value_t = 100)]
    step_ms: u64,

    /// Milliseconds the arrival celebration lasts
    #[arg(long, default_value_t = 3000)]
    celebrate_ms: u64,

    /// Milliseconds between two frames
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

fn parse_cell(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got \"{s}\""))?;
    let x = x.trim().parse::<i32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<i32>().map_err(|e| e.to_string())?;
    Ok((x, y))
}

fn render(session: &Session, now: Instant) {
    let grid = session.grid();
    let playback = session.playback();
    let route = session.path().map(|p| p.cells()).unwrap_or_default();
    let mut out = String::new();
    for cell in grid.cells() {
        let p = cell.point;
        let c = if playback.current_position() == Some(p) {
            '@'
        } else if cell.is_start {
            'S'
        } else if cell.is_end {
            'G'
        } else if cell.is_obstacle {
            '#'
        } else if playback.visited().contains(&p) {
            '*'
        } else if route.contains(&p) {
            '+'
        } else {
            '.'
        };
        out.push(c);
        out.push(' ');
        if p.x as usize == grid.width() - 1 {
            out.push('\n');
        }
    }
    let status = match playback.celebration_elapsed(now) {
        Some(elapsed) => {
            let pulse = 200.0 + 55.0 * (elapsed.as_secs_f64() * 6.0).sin();
            format!("{} (pulse {:.0})", session.status(), pulse.min(255.0))
        }
        None => session.status().to_string(),
    };
    println!("{out}{status}\n");
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = SessionConfig::with_size(args.width, args.height)
        .with_step_interval(Duration::from_millis(args.step_ms))
        .with_celebration(Duration::from_millis(args.celebrate_ms));
    let mut session = Session::new(config);

    session.select_tool(Tool::Start);
    if let Err(e) = session.click(args.start.0, args.start.1) {
        eprintln!("Invalid start: {e}");
        std::process::exit(1);
    }
    session.select_tool(Tool::End);
    if let Err(e) = session.click(args.goal.0, args.goal.1) {
        eprintln!("Invalid goal: {e}");
        std::process::exit(1);
    }

    session.select_tool(Tool::Obstacle);
    for (x, y) in &args.obstacle {
        // Clicks outside the grid are ignored, like in the interactive UI.
        let _ = session.click(*x, *y);
    }
    if args.density > 0.0 {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let endpoints = [
            Point::new(args.start.0, args.start.1),
            Point::new(args.goal.0, args.goal.1),
        ];
        for x in 0..args.width as i32 {
            for y in 0..args.height as i32 {
                if !endpoints.contains(&Point::new(x, y)) && rng.gen_bool(args.density) {
                    let _ = session.grid_mut().set_obstacle(x, y, true);
                }
            }
        }
    }

    match session.run() {
        Ok(RunOutcome::Started(cells)) => println!("Route found: {cells} cells"),
        Ok(_) => {
            render(&session, Instant::now());
            return;
        }
        Err(e) => {
            eprintln!("Run failed: {e}");
            std::process::exit(1);
        }
    }
    render(&session, Instant::now());

    let frame = Duration::from_millis(args.frame_ms);
    loop {
        let now = Instant::now();
        match session.update(now) {
            PlaybackEvent::None => {}
            PlaybackEvent::Finished => {
                render(&session, now);
                break;
            }
            _ => render(&session, now),
        }
        if session.playback().phase() == Phase::Celebrating && args.frame_ms > 0 {
            // Only redraw the pulse every few hundred milliseconds to keep the output readable.
            if let Some(elapsed) = session.playback().celebration_elapsed(now) {
                if elapsed.as_millis() % 500 < args.frame_ms as u128 {
                    render(&session, now);
                }
            }
        }
        thread::sleep(frame);
    }
}
