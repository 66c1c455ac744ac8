use drone_pathfinding::{find_path, Grid, Point};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  G|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// Nodes have a 4-neighborhood

fn main() {
    env_logger::init();
    let mut grid = Grid::new(3, 3);
    grid.set_obstacle(1, 1, true).unwrap();
    grid.set_start(0, 0).unwrap();
    grid.set_end(2, 2).unwrap();
    println!("{}", grid);
    let path = find_path(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
    println!("Path:");
    for p in &path {
        println!("{:?}", p);
    }
}
