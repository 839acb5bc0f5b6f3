//! Authoritative player registry.
//!
//! Last-known truth per player, exactly as the remote source reported it.
//! Render-side smoothing lives in `interp`; the reconciler keeps the two
//! collections keyed in lockstep.

use std::collections::BTreeMap;

use plaza_shared::proto::{Player, PlayerId, PlayerPatch};

/// Outcome of an upsert, so callers can seed dependent state for inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Merged,
}

/// Keyed player store. BTreeMap keeps iteration order stable.
#[derive(Default)]
pub struct Registry {
    players: BTreeMap<PlayerId, Player>,
}

impl Registry {
    /// Replaces the whole set, e.g. from a join snapshot.
    pub fn replace_all(&mut self, players: Vec<Player>) {
        self.players = players.into_iter().map(|p| (p.id, p)).collect();
    }

    /// Inserts a full record, overwriting any previous one.
    pub fn insert(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    /// Merges a partial record into a known player, or inserts a new one
    /// built from the patch with defaults for absent fields.
    pub fn upsert(&mut self, id: PlayerId, patch: &PlayerPatch) -> Upsert {
        match self.players.get_mut(&id) {
            Some(player) => {
                player.apply(patch);
                Upsert::Merged
            }
            None => {
                self.players.insert(id, Player::from_patch(id, patch));
                Upsert::Inserted
            }
        }
    }

    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        self.players.remove(&id)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter().map(|(id, p)| (*id, p))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_shared::math::Vec2;
    use plaza_shared::proto::Facing;

    fn player(id: u32) -> Player {
        Player {
            id: PlayerId(id),
            pos: Vec2::new(10.0, 10.0),
            facing: Facing::South,
            moving: false,
            name: format!("p{id}"),
            sprite_set: "walker".to_string(),
        }
    }

    #[test]
    fn upsert_merges_known_players() {
        let mut reg = Registry::default();
        reg.insert(player(1));

        let outcome = reg.upsert(
            PlayerId(1),
            &PlayerPatch::movement(Vec2::new(20.0, 10.0), Facing::East, true),
        );
        assert_eq!(outcome, Upsert::Merged);

        let p = reg.get(PlayerId(1)).unwrap();
        assert_eq!(p.pos, Vec2::new(20.0, 10.0));
        // fields absent from the patch are untouched
        assert_eq!(p.name, "p1");
        assert_eq!(p.sprite_set, "walker");
    }

    #[test]
    fn upsert_inserts_unknown_players() {
        let mut reg = Registry::default();
        let outcome = reg.upsert(
            PlayerId(3),
            &PlayerPatch::movement(Vec2::new(1.0, 2.0), Facing::North, true),
        );
        assert_eq!(outcome, Upsert::Inserted);
        assert!(reg.get(PlayerId(3)).unwrap().sprite_set.is_empty());
    }

    #[test]
    fn replace_all_drops_previous_set() {
        let mut reg = Registry::default();
        reg.insert(player(1));
        reg.replace_all(vec![player(2), player(3)]);
        assert!(!reg.contains(PlayerId(1)));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn iteration_is_ordered_by_id() {
        let mut reg = Registry::default();
        reg.insert(player(5));
        reg.insert(player(2));
        reg.insert(player(9));
        let ids: Vec<u32> = reg.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }
}
