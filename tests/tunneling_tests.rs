use approx::assert_relative_eq;
use sweepgrid::{Rect, Vec2, World};

fn make_world() -> World {
    World::new(64.0).expect("valid cell size")
}

#[test]
fn fast_body_cannot_tunnel_through_a_thin_wall() {
    let mut world = make_world();
    let wall = world
        .add_body("wall", Rect::new(100.0, 0.0, 4.0, 64.0))
        .unwrap();
    world.body_mut(wall).unwrap().set_static(true);

    let bullet = world
        .add_body("bullet", Rect::new(0.0, 28.0, 4.0, 4.0))
        .unwrap();

    // One step of 400 units against a 4 unit thick wall.
    let (position, collisions) = world.move_body(bullet, Vec2::new(400.0, 28.0)).unwrap();

    assert_eq!(collisions.len(), 1, "bullet tunneled through the wall");
    let fraction = collisions[0].intersection;
    assert!(
        fraction > 0.0 && fraction < 1.0,
        "fraction was {fraction}"
    );
    // Leading edge travels 96 of 400 units before contact.
    assert_relative_eq!(fraction, 0.24, epsilon = 1e-6);
    assert_relative_eq!(position.x, 95.99, epsilon = 1e-3);
    assert_relative_eq!(position.y, 28.0, epsilon = 1e-6);
}

#[test]
fn crossing_body_reports_every_obstacle_along_a_long_step() {
    let mut world = make_world();
    for x in [100.0, 200.0, 300.0] {
        let ghost = world
            .add_body("ghost", Rect::new(x, 0.0, 8.0, 64.0))
            .unwrap();
        world.body_mut(ghost).unwrap().set_static(true);
    }

    let bullet = world
        .add_body("bullet", Rect::new(0.0, 28.0, 4.0, 4.0))
        .unwrap();
    world
        .body_mut(bullet)
        .unwrap()
        .set_response("default", "cross");

    let (position, collisions) = world.move_body(bullet, Vec2::new(400.0, 28.0)).unwrap();

    assert_eq!(position, Vec2::new(400.0, 28.0));
    assert_eq!(collisions.len(), 3);
    assert!(collisions[0].intersection < collisions[1].intersection);
    assert!(collisions[1].intersection < collisions[2].intersection);
}

#[test]
fn diagonal_sweep_hits_a_body_off_the_straight_path_bounds() {
    let mut world = make_world();
    // Sits on the diagonal path, far from both endpoints.
    let block = world
        .add_body("block", Rect::new(120.0, 100.0, 16.0, 16.0))
        .unwrap();
    world.body_mut(block).unwrap().set_static(true);

    let mover = world
        .add_body("mover", Rect::new(0.0, 0.0, 16.0, 16.0))
        .unwrap();

    let (position, collisions) = world.move_body(mover, Vec2::new(240.0, 240.0)).unwrap();

    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].normal, Vec2::new(-1.0, 0.0));
    // Slide: deflected on x against the block's face, free along y.
    assert_relative_eq!(position.x, 103.99, epsilon = 1e-2);
    assert_relative_eq!(position.y, 240.0, epsilon = 1e-6);
}
