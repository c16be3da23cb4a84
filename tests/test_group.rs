use beam_barrage::entities::{Bullet, Explosion};
use beam_barrage::geometry::{Rect, Vec2};
use beam_barrage::group::Group;

fn bullet_at(x: f32, y: f32) -> Bullet {
    Bullet::new(Vec2::new(0.0, 1.0), Vec2::new(x, y), 6.0)
}

#[test]
fn new_group_is_empty() {
    let g: Group<Bullet> = Group::new();
    assert!(g.is_empty());
    assert_eq!(g.len(), 0);
}

#[test]
fn drain_overlapping_removes_only_hits() {
    let mut g: Group<Bullet> = [
        bullet_at(100.0, 100.0),
        bullet_at(300.0, 300.0),
        bullet_at(105.0, 95.0),
    ]
    .into_iter()
    .collect();
    let probe = Rect::from_center(Vec2::new(100.0, 100.0), Vec2::new(30.0, 30.0));

    let hit = g.drain_overlapping(&probe);
    assert_eq!(hit.len(), 2);
    assert_eq!(g.len(), 1);
    assert_eq!(g.iter().next().map(|b| b.rect.center()), Some(Vec2::new(300.0, 300.0)));

    // Second query finds nothing: the hits were consumed.
    assert!(g.drain_overlapping(&probe).is_empty());
}

#[test]
fn update_drops_members_that_die() {
    let mut g = Group::new();
    g.extend([
        Explosion::new(Vec2::new(0.0, 0.0), 0),
        Explosion::new(Vec2::new(0.0, 0.0), 5),
    ]);
    g.update();
    assert_eq!(g.len(), 1);
    assert_eq!(g.iter().next().map(|x| x.life), Some(4));
}

#[test]
fn update_drops_bullets_leaving_bounds() {
    let mut g = Group::new();
    g.add(bullet_at(500.0, 300.0));
    g.add(bullet_at(500.0, 636.0));
    g.update();
    assert_eq!(g.len(), 1);
}

#[test]
fn clone_is_independent() {
    let mut a = Group::new();
    a.add(bullet_at(1.0, 1.0));
    let mut b = a.clone();
    b.add(bullet_at(2.0, 2.0));
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 2);
}
