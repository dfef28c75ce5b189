use queensfall::model::config::GameConfig;
use queensfall::model::world::World;

/// A board fingerprint: every live entity's kind, position and glyph in
/// scan order, plus the player's stock.
fn snapshot(world: &World) -> String {
    let mut out = String::new();
    for row in 0..world.field.rows() {
        for col in 0..world.field.cols() {
            let cell = queensfall::model::geometry::Cell::new(row, col);
            if let Some(id) = world.field.occupant(cell) {
                let entity = world.entity(id).unwrap();
                out.push_str(&format!(
                    "{row},{col},{:?},{};",
                    entity.kind(),
                    entity.glyph()
                ));
            }
        }
    }
    out.push_str(&format!("ammo={};tick={}", world.ammo(), world.tick));
    out
}

#[test]
fn test_same_seed_same_run() {
    let mut config = GameConfig::default();
    config.seed = Some(12345);

    let mut a = World::new(config.clone());
    let mut b = World::new(config);

    for _ in 0..500 {
        a.advance().unwrap();
        b.advance().unwrap();
    }

    assert_eq!(snapshot(&a), snapshot(&b));
    assert_eq!(a.outcome, b.outcome);
}

#[test]
fn test_different_seeds_diverge() {
    let mut config = GameConfig::default();
    config.seed = Some(1);
    let mut a = World::new(config.clone());
    config.seed = Some(2);
    let mut b = World::new(config);

    for _ in 0..200 {
        a.advance().unwrap();
        b.advance().unwrap();
    }

    // Not a guarantee in principle, but with 200 ticks of randomized
    // movement two streams matching would mean the seed is ignored.
    assert_ne!(snapshot(&a), snapshot(&b));
}

#[test]
fn test_player_actions_keep_the_run_reproducible() {
    let mut config = GameConfig::default();
    config.seed = Some(777);
    config.player.start_ammo = 40;

    let script = |world: &mut World, tick: u64| {
        use queensfall::model::entity::Weapon;
        use queensfall::model::geometry::Direction;
        match tick {
            3 => world.fire(Direction::Right),
            10 => world.select_weapon(Weapon::Mine),
            11 => world.fire(Direction::Up),
            20 => world.move_player(Direction::Down),
            25 => world.fire(Direction::Right),
            _ => {}
        }
    };

    let mut a = World::new(config.clone());
    let mut b = World::new(config);
    for tick in 0..300 {
        script(&mut a, tick);
        script(&mut b, tick);
        a.advance().unwrap();
        b.advance().unwrap();
    }

    assert_eq!(snapshot(&a), snapshot(&b));
}
