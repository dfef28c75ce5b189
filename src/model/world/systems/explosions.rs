use crate::model::entity::EntityKind;
use crate::model::geometry::{Cell, Delta};
use crate::model::world::systems::{arm_mine, damage_wall, queen};
use crate::model::world::World;
use rand::Rng;

/// Sweep the square of half-width `radius` around `center` and apply blast
/// damage to every occupant. The center cell itself is left alone; the
/// detonating entity's own removal is its owner's business.
///
/// Chain reactions happen through fuses, not instantly: a mine caught in
/// the square is armed and detonates on a later tick, and bombers never
/// chain at all.
pub(crate) fn blast(world: &mut World, center: Cell, radius: i16, source: EntityKind) {
    tracing::debug!(
        row = center.row,
        col = center.col,
        radius,
        ?source,
        "blast"
    );
    for dr in -radius..=radius {
        for dc in -radius..=radius {
            if dr == 0 && dc == 0 {
                continue;
            }
            let cell = center + Delta { row: dr, col: dc };
            let Some((id, kind)) = world.kind_at(cell) else {
                continue;
            };
            match kind {
                EntityKind::Zombie
                | EntityKind::Walker
                | EntityKind::EnemyBullet
                | EntityKind::Cannon
                | EntityKind::Worker
                | EntityKind::ArmedWorker => world.despawn(id),
                EntityKind::Mine => arm_mine(world, id),
                EntityKind::Wall => {
                    let damage = world.rng.gen_range(1..=3);
                    damage_wall(world, id, damage);
                }
                EntityKind::Queen => queen::wound(world),
                // Bombers shrug off each other's blasts.
                EntityKind::Bomber => {
                    if source != EntityKind::Bomber {
                        world.despawn(id);
                    }
                }
                // Neither the player nor their bullets are touched by
                // shrapnel; an in-flight shot keeps flying.
                EntityKind::Player | EntityKind::Bullet => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::GameConfig;
    use crate::model::entity::EntityState;
    use crate::model::world::Outcome;

    fn seeded_world() -> World {
        let mut config = GameConfig::default();
        config.seed = Some(7);
        World::bare(config)
    }

    #[test]
    fn test_blast_clears_enemies_and_crew_but_not_center() {
        let mut world = seeded_world();
        let zombie = world.spawn(EntityState::Zombie, Cell::new(4, 5)).unwrap();
        let worker = world.spawn(EntityState::Worker, Cell::new(6, 5)).unwrap();
        let mine = world
            .spawn(EntityState::Mine { armed_at: None }, Cell::new(5, 5))
            .unwrap();

        blast(&mut world, Cell::new(5, 5), 2, EntityKind::Mine);

        assert!(world.entity(zombie).is_none());
        assert!(world.entity(worker).is_none());
        // The center occupant survives the sweep.
        assert!(world.entity(mine).is_some());
    }

    #[test]
    fn test_blast_arms_nearby_mine_instead_of_chaining() {
        let mut world = seeded_world();
        let mine = world
            .spawn(EntityState::Mine { armed_at: None }, Cell::new(5, 6))
            .unwrap();

        blast(&mut world, Cell::new(5, 5), 2, EntityKind::Bomber);

        match world.entity(mine).map(|e| &e.state) {
            Some(EntityState::Mine { armed_at }) => assert!(armed_at.is_some()),
            other => panic!("expected armed mine, got {other:?}"),
        }
    }

    #[test]
    fn test_blast_spares_friendly_bullets() {
        use crate::model::geometry::Direction;

        let mut world = seeded_world();
        let bullet = world
            .spawn(
                EntityState::Bullet {
                    dir: Direction::Right,
                    speed: 1,
                    collided: false,
                },
                Cell::new(5, 7),
            )
            .unwrap();
        let enemy = world
            .spawn(
                EntityState::EnemyBullet {
                    dir: Direction::Left,
                    speed: 1,
                    collided: false,
                },
                Cell::new(5, 3),
            )
            .unwrap();

        blast(&mut world, Cell::new(5, 5), 2, EntityKind::Mine);

        assert!(world.entity(bullet).is_some());
        assert!(world.entity(enemy).is_none());
    }

    #[test]
    fn test_blast_wounds_queen() {
        let mut world = seeded_world();
        let queen_pos = world.entity(world.queen).unwrap().pos;
        blast(
            &mut world,
            Cell::new(queen_pos.row, queen_pos.col - 1),
            2,
            EntityKind::Bomber,
        );
        assert_eq!(world.queen_life(), 8);
        assert_ne!(world.outcome, Some(Outcome::Victory));
    }
}
