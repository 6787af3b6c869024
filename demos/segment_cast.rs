//! Casts a segment across a small scene and prints the bodies it crosses in
//! near-to-far order.

use sweepgrid::{Rect, Vec2, World};

fn main() {
    let mut world = World::new(64.0).expect("valid cell size");

    for (tag, rect) in [
        ("wall", Rect::new(64.0, 0.0, 64.0, 64.0)),
        ("crate", Rect::new(180.0, 10.0, 24.0, 24.0)),
        ("wall", Rect::new(256.0, 0.0, 16.0, 64.0)),
        ("crate", Rect::new(100.0, 200.0, 24.0, 24.0)), // off the ray
    ] {
        let id = world.add_body(tag, rect).expect("valid rect");
        world.body_mut(id).unwrap().set_static(true);
    }

    let from = Vec2::new(0.0, 16.0);
    let to = Vec2::new(300.0, 16.0);
    println!("casting ({},{}) -> ({},{})", from.x, from.y, to.x, to.y);

    for id in world.query_segment(from, to, &[]) {
        let body = world.body(id).unwrap();
        println!("  hit {:>5} at x={}", body.tag(), body.position().x);
    }

    println!("walls only:");
    for id in world.query_segment(from, to, &["wall"]) {
        let body = world.body(id).unwrap();
        println!("  hit {:>5} at x={}", body.tag(), body.position().x);
    }
}
