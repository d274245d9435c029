use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::entity::{validate_name, Entity, EntityState};
use crate::errors::{Result, StatusError};

/// Snapshot - one observed, ordered set of entities
///
/// Order reflects discovery order and is preserved as given. Every name
/// appears at most once; the constructors reject duplicates, and so does
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Entity>", into = "Vec<Entity>")]
pub struct Snapshot {
    entities: Vec<Entity>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a snapshot from an ordered list of entities
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` for a malformed name and `DuplicateEntity` if a
    /// name appears more than once.
    pub fn new(entities: Vec<Entity>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entities.len());
        for entity in &entities {
            validate_name(&entity.name)?;
            if !seen.insert(entity.name.as_str()) {
                return Err(StatusError::DuplicateEntity {
                    name: entity.name.clone(),
                });
            }
        }
        Ok(Self { entities })
    }

    /// Build a snapshot from `(name, on)` pairs, keeping their order
    ///
    /// # Errors
    ///
    /// Same as [`Snapshot::new`].
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let entities = pairs
            .into_iter()
            .map(|(name, on)| Entity::new(name, on))
            .collect::<Result<Vec<_>>>()?;
        Self::new(entities)
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the snapshot holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in snapshot order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate entities in snapshot order
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    /// Look up an entity by name
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// State of the named entity, if present
    pub fn state_of(&self, name: &str) -> Option<EntityState> {
        self.get(name).map(|e| e.state)
    }

    /// Names in snapshot order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.name.as_str())
    }

    /// Check if at least one entity is on
    pub fn any_on(&self) -> bool {
        self.entities.iter().any(Entity::is_on)
    }

    /// Number of entities that are on
    pub fn on_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_on()).count()
    }

    /// Keep only the first `max` entities
    pub fn truncated(mut self, max: usize) -> Self {
        self.entities.truncate(max);
        self
    }
}

impl TryFrom<Vec<Entity>> for Snapshot {
    type Error = StatusError;

    fn try_from(entities: Vec<Entity>) -> Result<Self> {
        Self::new(entities)
    }
}

impl From<Snapshot> for Vec<Entity> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.entities
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
