//! Heroes marked for bridging, in the order they were marked.

use crate::directory::Hero;

/// Insertion-ordered set of selected heroes keyed by id.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    heroes: Vec<Hero>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `hero`. An already selected id keeps its position and snapshot.
    pub fn insert(&mut self, hero: Hero) -> bool {
        if self.contains(hero.id) {
            return false;
        }
        self.heroes.push(hero);
        true
    }

    pub fn remove(&mut self, hero_id: u64) -> Option<Hero> {
        let index = self.heroes.iter().position(|h| h.id == hero_id)?;
        Some(self.heroes.remove(index))
    }

    pub fn contains(&self, hero_id: u64) -> bool {
        self.heroes.iter().any(|h| h.id == hero_id)
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.iter()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.heroes.iter().map(|h| h.id).collect()
    }

    /// Copy of the current selection for a bridge run.
    pub fn snapshot(&self) -> Vec<Hero> {
        self.heroes.clone()
    }
}
