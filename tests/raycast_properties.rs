use approx::assert_relative_eq;
use glam::{IVec2, Vec2};

use grid_raycast::raycast::RayWalk;
use grid_raycast::{Cell, GridInfo, RayQuery, RaycastError, WallGrid, trace};

const CELL_SIZE: f32 = 20.0;

fn grid_with_walls(walls: &[IVec2]) -> WallGrid {
    let mut grid = WallGrid::empty(GridInfo::square(10, CELL_SIZE)).expect("grid should build");
    for &cell in walls {
        grid.set(cell, Cell::Wall).expect("wall in bounds");
    }
    grid
}

fn directions() -> Vec<Vec2> {
    (0..72)
        .map(|i| {
            let angle = (i as f32 * 5.0 + 0.5).to_radians();
            Vec2::new(angle.cos(), angle.sin())
        })
        .chain([Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y, Vec2::ONE, Vec2::NEG_ONE])
        .collect()
}

#[test]
fn empty_grid_never_hits() {
    let grid = grid_with_walls(&[]);
    for origin in [Vec2::new(105.0, 105.0), Vec2::new(-50.0, 30.0), Vec2::new(0.0, 0.0)] {
        for dir in directions() {
            let result = trace(&grid, origin, dir, 700.0).unwrap();
            assert!(!result.hit, "unexpected hit for {dir:?} from {origin:?}");
            assert_eq!(result.distance, 700.0);
            assert_eq!(result.cell, None);
        }
    }
}

#[test]
fn concrete_hit_scenario() {
    let grid = grid_with_walls(&[IVec2::new(7, 5)]);
    let result = trace(&grid, Vec2::new(105.0, 105.0), Vec2::new(1.0, 0.0), 1000.0).unwrap();

    assert!(result.hit);
    assert_relative_eq!(result.distance, 35.0, epsilon = 1e-4);
}

#[test]
fn concrete_miss_scenario() {
    let grid = grid_with_walls(&[]);
    let result = trace(&grid, Vec2::new(105.0, 105.0), Vec2::new(0.0, 1.0), 50.0).unwrap();

    assert!(!result.hit);
    assert_eq!(result.distance, 50.0);
}

#[test]
fn halving_max_distance_is_consistent() {
    let walls = [
        IVec2::new(7, 5),
        IVec2::new(2, 2),
        IVec2::new(8, 8),
        IVec2::new(1, 7),
        IVec2::new(5, 0),
    ];
    let grid = grid_with_walls(&walls);
    let origin = Vec2::new(105.0, 105.0);

    for dir in directions() {
        let full = trace(&grid, origin, dir, 400.0).unwrap();
        let half = trace(&grid, origin, dir, 200.0).unwrap();

        if full.hit && full.distance <= 200.0 {
            assert!(half.hit);
            assert_eq!(half.distance, full.distance);
            assert_eq!(half.cell, full.cell);
        } else {
            assert!(!half.hit, "half hit {half:?} but full was {full:?}");
            assert_eq!(half.distance, 200.0);
        }
    }
}

#[test]
fn mirrored_rays_are_symmetric() {
    let width = 10.0 * CELL_SIZE;
    for col in 0..10 {
        for x in [3.0, 47.5, 105.0, 151.25] {
            let forward = grid_with_walls(&[IVec2::new(col, 4)]);
            let mirrored = grid_with_walls(&[IVec2::new(9 - col, 4)]);

            let a = trace(&forward, Vec2::new(x, 90.0), Vec2::X, 1000.0).unwrap();
            let b = trace(&mirrored, Vec2::new(width - x, 90.0), Vec2::NEG_X, 1000.0).unwrap();

            assert_eq!(a.hit, b.hit, "col {col} x {x}");
            assert_relative_eq!(a.distance, b.distance, epsilon = 1e-3);
        }
    }
}

#[test]
fn origin_on_grid_line_is_stable() {
    let grid = grid_with_walls(&[IVec2::new(7, 5)]);

    let exact = trace(&grid, Vec2::new(100.0, 105.0), Vec2::X, 1000.0).unwrap();
    assert_eq!(exact.distance, 40.0);

    let start = RayWalk::new(grid.info(), Vec2::new(100.0, 105.0), Vec2::X, 1000.0)
        .unwrap()
        .cell();
    assert_eq!(start, IVec2::new(5, 5));

    for jitter in [-1e-3, -1e-4, 1e-4, 1e-3] {
        let nudged = trace(&grid, Vec2::new(100.0 + jitter, 105.0), Vec2::X, 1000.0).unwrap();
        assert!(nudged.hit);
        assert_relative_eq!(nudged.distance, 40.0, epsilon = 1e-2);
    }
}

#[test]
fn ray_from_outside_reaches_grid_along_axis() {
    let grid = grid_with_walls(&[IVec2::new(0, 3)]);
    let result = trace(&grid, Vec2::new(-400.0, 70.0), Vec2::X, 1000.0).unwrap();

    assert!(result.hit);
    assert_relative_eq!(result.distance, 400.0, epsilon = 1e-3);
}

#[test]
fn step_count_is_bounded() {
    let grid = grid_with_walls(&[]);
    let max_distance = 1000.0;
    let bound = 2 * (max_distance / CELL_SIZE).ceil() as u32 + 2;

    for origin in [Vec2::new(105.0, 105.0), Vec2::new(-300.0, -300.0), Vec2::new(1e4, 50.0)] {
        for dir in directions() {
            let result = trace(&grid, origin, dir, max_distance).unwrap();
            assert!(result.steps <= bound, "{} steps for {dir:?}", result.steps);
        }
    }
}

#[test]
fn query_walk_and_trace_agree() {
    let grid = grid_with_walls(&[IVec2::new(8, 2)]);
    let query = RayQuery::towards(Vec2::new(12.0, 12.0), Vec2::new(180.0, 50.0), 1000.0);

    let result = query.trace(&grid).unwrap();
    let first_wall = query
        .walk(&grid)
        .unwrap()
        .find(|step| grid.cell_at(step.cell) == Some(Cell::Wall))
        .expect("walk should reach the wall");

    assert!(result.hit);
    assert_eq!(result.cell, Some(first_wall.cell));
    assert_eq!(result.distance, first_wall.distance);
}

#[test]
fn invalid_inputs_fail_fast() {
    let grid = grid_with_walls(&[]);
    assert!(matches!(
        trace(&grid, Vec2::ZERO, Vec2::ZERO, 10.0),
        Err(RaycastError::InvalidDirection)
    ));
    assert!(matches!(
        trace(&grid, Vec2::ZERO, Vec2::X, f32::NAN),
        Err(RaycastError::InvalidDistance(_))
    ));
    assert!(matches!(
        WallGrid::empty(GridInfo::new(0, 0, 20.0)),
        Err(RaycastError::InvalidGrid(_))
    ));
}
