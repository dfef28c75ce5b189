use crate::model::entity::Entity;

/// Generational handle into the entity arena. The grid and the per-kind
/// registries store these instead of owning references; a handle whose slot
/// has been reused simply fails the lookup, so nothing can act on a removed
/// entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Arena storage for every live entity, all kinds mixed. Slots are reused
/// through a free list; each reuse bumps the generation so stale ids die.
#[derive(Debug, Default)]
pub struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity) -> EntityId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            EntityId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                entity: Some(entity),
            });
            EntityId {
                index,
                generation: 0,
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_mut()
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation || slot.entity.is_none() {
            return None;
        }
        let entity = slot.entity.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        entity
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entity.as_ref().map(|entity| {
                (
                    EntityId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    entity,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::EntityState;
    use crate::model::geometry::Cell;

    fn zombie(row: i16, col: i16) -> Entity {
        Entity::new(Cell::new(row, col), EntityState::Zombie)
    }

    #[test]
    fn test_insert_get_remove() {
        let mut arena = Arena::new();
        let id = arena.insert(zombie(1, 2));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(id).map(|e| e.pos), Some(Cell::new(1, 2)));

        let removed = arena.remove(id);
        assert!(removed.is_some());
        assert!(arena.get(id).is_none());
        assert!(arena.is_empty());
    }

    #[test]
    fn test_stale_handle_is_dead_after_reuse() {
        let mut arena = Arena::new();
        let old = arena.insert(zombie(0, 0));
        arena.remove(old);

        // Reuses the same slot with a bumped generation.
        let new = arena.insert(zombie(3, 4));
        assert_ne!(old, new);
        assert!(arena.get(old).is_none());
        assert!(!arena.contains(old));
        assert_eq!(arena.get(new).map(|e| e.pos), Some(Cell::new(3, 4)));
    }

    #[test]
    fn test_double_remove_is_noop() {
        let mut arena = Arena::new();
        let id = arena.insert(zombie(0, 0));
        assert!(arena.remove(id).is_some());
        assert!(arena.remove(id).is_none());
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_iter_yields_live_entities_only() {
        let mut arena = Arena::new();
        let a = arena.insert(zombie(0, 0));
        let b = arena.insert(zombie(0, 1));
        arena.remove(a);

        let ids: Vec<_> = arena.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![b]);
    }
}
