use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Result, StatusError};

/// Longest identifier accepted for an entity, in characters
pub const MAX_ENTITY_NAME_LEN: usize = 31;

/// On/off state of one tracked service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityState {
    On,
    Off,
}

impl EntityState {
    /// Check if the service is running
    pub fn is_on(self) -> bool {
        matches!(self, EntityState::On)
    }

    /// Label used in status tables and change lines
    pub fn label(self) -> &'static str {
        match self {
            EntityState::On => "ON",
            EntityState::Off => "OFF",
        }
    }
}

impl From<bool> for EntityState {
    fn from(on: bool) -> Self {
        if on {
            EntityState::On
        } else {
            EntityState::Off
        }
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entity - one named service whose on/off status is tracked
///
/// The name doubles as the join key when two snapshots are compared, so it
/// must be unique within a snapshot (enforced by [`crate::model::Snapshot`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Service identifier, e.g. the config file stem `office`
    pub name: String,

    /// Observed state
    pub state: EntityState,
}

impl Entity {
    /// Create a new Entity after validating its name
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` if the name is empty, longer than
    /// [`MAX_ENTITY_NAME_LEN`] characters, or contains whitespace, `/` or
    /// control characters.
    pub fn new(name: impl Into<String>, state: impl Into<EntityState>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            state: state.into(),
        })
    }

    /// Check if this entity is running
    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }
}

/// Validate an entity identifier
///
/// # Errors
///
/// Returns `InvalidName` describing the first rule the name breaks.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name cannot be empty".to_string())
    } else if name.chars().count() > MAX_ENTITY_NAME_LEN {
        Some(format!(
            "name is longer than {} characters",
            MAX_ENTITY_NAME_LEN
        ))
    } else if name.contains('/') {
        Some("name cannot contain '/'".to_string())
    } else if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        Some("name cannot contain whitespace or control characters".to_string())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StatusError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Cut a raw identifier down to [`MAX_ENTITY_NAME_LEN`] characters
///
/// Truncation happens on character boundaries, never inside a UTF-8 sequence.
pub fn truncate_name(raw: &str) -> String {
    raw.chars().take(MAX_ENTITY_NAME_LEN).collect()
}
