//! Minimal platformer-style walk: a player slides along a floor and into a
//! wall over a few simulated steps.

use sweepgrid::{Rect, Vec2, World};

fn main() {
    let mut world = World::with_default_cell_size();

    let floor = world
        .add_body("wall", Rect::new(0.0, 128.0, 640.0, 32.0))
        .expect("floor");
    world.body_mut(floor).unwrap().set_static(true);

    let wall = world
        .add_body("wall", Rect::new(400.0, 0.0, 32.0, 160.0))
        .expect("wall");
    world.body_mut(wall).unwrap().set_static(true);

    let player = world
        .add_body("player", Rect::new(32.0, 32.0, 24.0, 24.0))
        .expect("player");

    // Walk right while gravity pulls down; slide keeps the player on the
    // floor until the wall stops the run.
    for step in 0..8 {
        let position = world.body(player).unwrap().position();
        let goal = position + Vec2::new(64.0, 48.0);
        let (actual, collisions) = world.move_body(player, goal).unwrap();
        println!(
            "step {step}: goal ({:6.1},{:6.1}) -> ({:6.1},{:6.1}), {} collision(s)",
            goal.x,
            goal.y,
            actual.x,
            actual.y,
            collisions.len()
        );
    }

    let final_position = world.body(player).unwrap().position();
    println!("came to rest at ({:.2}, {:.2})", final_position.x, final_position.y);
}
