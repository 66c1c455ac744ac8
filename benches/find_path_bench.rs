use criterion::{criterion_group, criterion_main, Criterion};
use drone_pathfinding::{AstarSolver, DijkstraSolver, Grid, GridSolver, Point};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn random_grid(n: usize, rng: &mut StdRng) -> Grid {
    let mut grid = Grid::new(n, n);
    for x in 0..n as i32 {
        for y in 0..n as i32 {
            grid.set_obstacle(x, y, rng.gen_bool(0.3)).unwrap();
        }
    }
    grid.set_obstacle(0, 0, false).unwrap();
    grid.set_obstacle(n as i32 - 1, n as i32 - 1, false).unwrap();
    grid.update();
    grid
}

fn bench_solver<S: GridSolver>(c: &mut Criterion, solver_name: &str, solver: S) {
    let mut rng = StdRng::seed_from_u64(0);
    for n in [10, 64] {
        let grids = (0..20)
            .map(|_| random_grid(n, &mut rng))
            .collect::<Vec<_>>();
        let start = Point::new(0, 0);
        let end = Point::new(n as i32 - 1, n as i32 - 1);
        c.bench_function(format!("{solver_name}, {n}x{n}").as_str(), |b| {
            b.iter(|| {
                for grid in &grids {
                    black_box(solver.find_path(grid, start, end).ok());
                }
            })
        });
    }
}

fn open_grid_bench(c: &mut Criterion) {
    let grid = Grid::new(10, 10);
    c.bench_function("A*, open 10x10", |b| {
        b.iter(|| black_box(AstarSolver::new().find_path(&grid, Point::new(0, 0), Point::new(9, 9))))
    });
}

fn solver_bench(c: &mut Criterion) {
    bench_solver(c, "A*", AstarSolver::new());
    bench_solver(c, "Dijkstra", DijkstraSolver);
}

criterion_group!(benches, open_grid_bench, solver_bench);
criterion_main!(benches);
