use sweepgrid::{BodyId, Rect, Vec2, World};

fn make_world() -> World {
    World::new(64.0).expect("valid cell size")
}

fn add_static(world: &mut World, tag: &str, rect: Rect) -> BodyId {
    let id = world.add_body(tag, rect).expect("valid rect");
    world.body_mut(id).unwrap().set_static(true);
    id
}

#[test]
fn rect_query_returns_overlapping_bodies() {
    let mut world = make_world();
    let wall = add_static(&mut world, "wall", Rect::new(64.0, 0.0, 64.0, 64.0));
    add_static(&mut world, "wall", Rect::new(500.0, 500.0, 64.0, 64.0));

    let hits = world.query_rect(Rect::new(0.0, 0.0, 100.0, 100.0), &[]);
    assert_eq!(hits, vec![wall]);
}

#[test]
fn rect_query_filters_by_tag() {
    let mut world = make_world();
    add_static(&mut world, "wall", Rect::new(0.0, 0.0, 32.0, 32.0));
    let coin = add_static(&mut world, "coin", Rect::new(32.0, 0.0, 16.0, 16.0));

    let hits = world.query_rect(Rect::new(0.0, 0.0, 64.0, 64.0), &["coin"]);
    assert_eq!(hits, vec![coin]);
}

#[test]
fn point_query_is_strict_about_boundaries() {
    let mut world = make_world();
    let wall = add_static(&mut world, "wall", Rect::new(64.0, 0.0, 64.0, 64.0));

    assert_eq!(world.query_point(Vec2::new(96.0, 32.0), &[]), vec![wall]);
    // Points exactly on an edge are outside.
    assert!(world.query_point(Vec2::new(64.0, 32.0), &[]).is_empty());
    // Uncharted space has no cell at all.
    assert!(world.query_point(Vec2::new(-500.0, -500.0), &[]).is_empty());
}

#[test]
fn segment_query_orders_bodies_by_entry_fraction() {
    let mut world = make_world();
    let far = add_static(&mut world, "wall", Rect::new(256.0, 0.0, 16.0, 64.0));
    let wall = add_static(&mut world, "wall", Rect::new(64.0, 0.0, 64.0, 64.0));

    let hits = world.query_segment(Vec2::new(0.0, 16.0), Vec2::new(300.0, 16.0), &[]);
    assert_eq!(hits, vec![wall, far]);
}

#[test]
fn segment_query_skips_bodies_whose_cells_it_crosses_but_misses() {
    let mut world = make_world();
    // Same cell row as the segment, but above it.
    add_static(&mut world, "wall", Rect::new(100.0, 0.0, 16.0, 10.0));
    let hit = add_static(&mut world, "wall", Rect::new(200.0, 0.0, 16.0, 64.0));

    let hits = world.query_segment(Vec2::new(0.0, 40.0), Vec2::new(300.0, 40.0), &[]);
    assert_eq!(hits, vec![hit]);
}

#[test]
fn segment_query_filters_by_tag() {
    let mut world = make_world();
    add_static(&mut world, "wall", Rect::new(64.0, 0.0, 64.0, 64.0));
    let sensor = add_static(&mut world, "sensor", Rect::new(192.0, 0.0, 16.0, 64.0));

    let hits = world.query_segment(Vec2::new(0.0, 16.0), Vec2::new(300.0, 16.0), &["sensor"]);
    assert_eq!(hits, vec![sensor]);
}

#[test]
fn queries_see_a_body_after_it_moves() {
    let mut world = make_world();
    let player = world
        .add_body("player", Rect::new(0.0, 0.0, 32.0, 32.0))
        .unwrap();

    world.move_body(player, Vec2::new(400.0, 400.0)).unwrap();

    let old = world.query_rect(Rect::new(0.0, 0.0, 64.0, 64.0), &[]);
    assert!(old.is_empty(), "player still visible at its old location");

    let rect = world.body(player).unwrap().rect();
    assert_eq!(world.query_rect(rect, &[]), vec![player]);
}

#[test]
fn removed_body_disappears_from_queries() {
    let mut world = make_world();
    let wall = add_static(&mut world, "wall", Rect::new(64.0, 0.0, 64.0, 64.0));
    let rect = world.body(wall).unwrap().rect();

    assert!(world.remove_body(wall).is_some());

    assert!(world.query_rect(rect, &[]).is_empty());
    assert!(world
        .query_segment(Vec2::new(0.0, 16.0), Vec2::new(300.0, 16.0), &[])
        .is_empty());
    assert!(world.body(wall).is_none());
}
