//! Bidirectional GitLab user id <-> GitHub handle mapping.

use std::collections::{BTreeMap, HashMap};

use crate::error::{MigrationError, Result};
use crate::source::UserId;

/// Association between GitLab user ids and GitHub handles.
///
/// Both directions are one-to-one; conflicting entries are rejected when the
/// mapping is built. Immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserMapping {
    by_id: BTreeMap<UserId, String>,
    by_handle: HashMap<String, UserId>,
}

impl UserMapping {
    /// Build a mapping from `(handle, user id)` pairs.
    ///
    /// A leading `@` on a handle is stripped. Repeating an identical pair is
    /// allowed; mapping one id to two handles (or the reverse) is an error.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, UserId)>,
        S: AsRef<str>,
    {
        let mut mapping = Self::default();
        for (handle, id) in pairs {
            let handle = handle.as_ref().trim().trim_start_matches('@');
            if handle.is_empty() {
                return Err(MigrationError::configuration(format!(
                    "empty GitHub handle for user id {id}"
                )));
            }

            if let Some(existing) = mapping.by_id.get(&id)
                && existing != handle
            {
                return Err(MigrationError::configuration(format!(
                    "user id {id} is mapped to both @{existing} and @{handle}"
                )));
            }
            if let Some(existing) = mapping.by_handle.get(handle)
                && *existing != id
            {
                return Err(MigrationError::configuration(format!(
                    "@{handle} is mapped to both user ids {existing} and {id}"
                )));
            }

            mapping.by_id.insert(id, handle.to_string());
            mapping.by_handle.insert(handle.to_string(), id);
        }
        Ok(mapping)
    }

    /// GitHub handle (without `@`) for a GitLab user id.
    pub fn handle_for(&self, id: UserId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// GitLab user id for a GitHub handle (with or without `@`).
    pub fn id_for(&self, handle: &str) -> Option<UserId> {
        self.by_handle.get(handle.trim_start_matches('@')).copied()
    }

    /// Render a user reference: `@handle` when mapped, the raw id otherwise.
    pub fn mention(&self, id: UserId) -> String {
        match self.handle_for(id) {
            Some(handle) => format!("@{handle}"),
            None => id.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Mapped pairs ordered by user id.
    pub fn iter(&self) -> impl Iterator<Item = (UserId, &str)> {
        self.by_id.iter().map(|(id, h)| (*id, h.as_str()))
    }
}
