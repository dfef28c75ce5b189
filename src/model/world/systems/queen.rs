use crate::model::entity::EntityState;
use crate::model::events::GameEvent;
use crate::model::geometry::{Cell, Direction};
use crate::model::world::{Outcome, World};
use rand::Rng;

/// The queen paces her column, drifting one row up or down inside her band.
/// Up and down are rolled independently, so most ticks she holds still.
pub(crate) fn step(world: &mut World) {
    let one_in = world.config.odds.queen_shift_one_in;
    if one_in == 0 {
        return;
    }
    let Some(entity) = world.entity(world.queen) else {
        return;
    };
    let pos = entity.pos;

    if world.rng.gen_range(0..one_in) == 0 && pos.row >= world.config.queen.band_top {
        try_shift(world, pos, Direction::Up);
    } else if world.rng.gen_range(0..one_in) == 0 && pos.row <= world.config.queen.band_bottom {
        try_shift(world, pos, Direction::Down);
    }
}

fn try_shift(world: &mut World, pos: Cell, dir: Direction) {
    let target = pos.step(dir);
    if world.field.out_of_bounds(target) || !world.field.is_free(target) {
        return;
    }
    let queen = world.queen;
    let _ = world.move_entity(queen, target);
}

/// Take one hit off the queen. Every wound makes her throw up a fresh
/// bulwark; the killing blow ends the run in victory instead.
pub(crate) fn wound(world: &mut World) {
    let remaining = {
        let Some(EntityState::Queen { life }) =
            world.entity_mut(world.queen).map(|e| &mut e.state)
        else {
            return;
        };
        if *life == 0 {
            return;
        }
        *life -= 1;
        *life
    };

    tracing::info!(life = remaining, "queen wounded");
    world.push_event(GameEvent::QueenWounded { life: remaining });

    // Even the killing blow provokes one last bulwark before the end.
    build_bulwark(world);
    if remaining == 0 {
        world.end(Outcome::Victory);
    }
}

/// Throw up a vertical run of flimsy walls between the queen and the
/// attack. The span is centered on her row, clamped to the board, and goes
/// into the rightmost column that can hold it whole; a board too cluttered
/// to fit one anywhere means no bulwark this time.
fn build_bulwark(world: &mut World) {
    let min = world.config.queen.wall_min_len;
    let max = world.config.queen.wall_max_len;
    let len = world.rng.gen_range(min..=max);

    let Some(entity) = world.entity(world.queen) else {
        return;
    };
    let row = entity.pos.row;
    let top = (row - len / 2).max(0);
    let bottom = (row + (len - 1) / 2).min(world.field.rows() - 1);

    let outer = world.config.queen.spawn_col - 1;
    let inner = world.config.field.partition_col + 1;
    for col in (inner..=outer).rev() {
        let open = (top..=bottom).all(|r| world.field.is_free(Cell::new(r, col)));
        if !open {
            continue;
        }
        for r in top..=bottom {
            let _ = world.spawn(EntityState::Wall { strength: 1 }, Cell::new(r, col));
        }
        tracing::debug!(col, top, bottom, "bulwark raised");
        return;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::GameConfig;
    use crate::model::entity::EntityKind;

    fn seeded_world() -> World {
        let mut config = GameConfig::default();
        config.seed = Some(29);
        World::bare(config)
    }

    #[test]
    fn test_wound_raises_bulwark_in_rightmost_open_column() {
        let mut world = seeded_world();
        wound(&mut world);

        assert_eq!(world.queen_life(), 8);
        // Queen sits at column 49; the bulwark goes up at 48.
        let built: Vec<_> = (0..20)
            .filter(|&r| {
                matches!(
                    world.kind_at(Cell::new(r, 48)),
                    Some((_, EntityKind::Wall))
                )
            })
            .collect();
        assert!(built.len() >= 3 && built.len() <= 5);
        assert!(built.contains(&10));
    }

    #[test]
    fn test_killing_blow_is_victory_with_one_last_bulwark() {
        let mut world = seeded_world();
        if let Some(EntityState::Queen { life }) =
            world.entity_mut(world.queen).map(|e| &mut e.state)
        {
            *life = 1;
        }

        wound(&mut world);

        assert_eq!(world.queen_life(), 0);
        assert_eq!(world.outcome, Some(Outcome::Victory));
        assert!(!world.registries.walls.is_empty());
    }

    #[test]
    fn test_wound_on_dead_queen_is_inert() {
        let mut world = seeded_world();
        if let Some(EntityState::Queen { life }) =
            world.entity_mut(world.queen).map(|e| &mut e.state)
        {
            *life = 0;
        }
        wound(&mut world);
        assert_eq!(world.queen_life(), 0);
        assert_eq!(world.outcome, None);
    }

    #[test]
    fn test_queen_stays_inside_her_band() {
        let mut config = GameConfig::default();
        config.seed = Some(29);
        config.odds.queen_shift_one_in = 1;
        let mut world = World::bare(config);

        for _ in 0..200 {
            step(&mut world);
            let row = world.entity(world.queen).unwrap().pos.row;
            assert!(row >= world.config.queen.band_top - 1);
            assert!(row <= world.config.queen.band_bottom + 1);
        }
    }
}
