use drone_pathfinding::{find_path, Error, Grid, Point};

// A full wall at x = 5 separates the two halves of the reference 10x10 grid. Opening a single
// gap makes the goal reachable again.

fn main() {
    env_logger::init();
    let mut grid = Grid::new(10, 10);
    for y in 0..10 {
        grid.set_obstacle(5, y, true).unwrap();
    }
    grid.update();
    let start = Point::new(0, 0);
    let end = Point::new(9, 9);
    match find_path(&grid, start, end) {
        Ok(path) => println!("Unexpected path: {:?}", path.cells()),
        Err(Error::NoPathFound { .. }) => println!("No path through the wall"),
        Err(e) => println!("{}", e),
    }

    grid.set_obstacle(5, 7, false).unwrap();
    let path = find_path(&grid, start, end).unwrap();
    println!("Through the gap in {} steps: {:?}", path.cost(), path.cells());
}
