/*!
Application profile registry.

A keyed record store for registered application profiles (the QoS parameters
an application announces when it requests a path). CRUD sidecar: not part of
the graph core, not persisted.
*/

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// QoS profile registered for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppProfile {
    pub app_id: u32,
    pub jitter: u32,
    pub packet_loss: u32,
    pub packet_delay: u32,
    pub bandwidth: u32,
}

#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("no application registered with id {0}")]
    NotFound(u32),
}

/// In-memory keyed store of application profiles. Datastore `put`
/// semantics: inserting over an existing id replaces the record.
#[derive(Debug, Default)]
pub struct ApplicationRegistry {
    entries: RwLock<HashMap<u32, AppProfile>>,
}

impl ApplicationRegistry {
    pub fn new() -> Self {
        ApplicationRegistry::default()
    }

    /// Register a profile; replaces any previous record under the same id.
    pub fn insert(&self, profile: AppProfile) {
        info!(app_id = profile.app_id, "registering application profile");
        self.entries
            .write()
            .expect("registry lock poisoned")
            .insert(profile.app_id, profile);
    }

    pub fn get(&self, app_id: u32) -> Option<AppProfile> {
        debug!(app_id, "reading application profile");
        self.entries
            .read()
            .expect("registry lock poisoned")
            .get(&app_id)
            .cloned()
    }

    pub fn remove(&self, app_id: u32) -> Result<AppProfile, RegistryError> {
        self.entries
            .write()
            .expect("registry lock poisoned")
            .remove(&app_id)
            .ok_or(RegistryError::NotFound(app_id))
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(app_id: u32, bandwidth: u32) -> AppProfile {
        AppProfile {
            app_id,
            jitter: 10,
            packet_loss: 1,
            packet_delay: 20,
            bandwidth,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let registry = ApplicationRegistry::new();
        assert!(registry.is_empty());

        registry.insert(profile(7, 1000));
        assert_eq!(registry.get(7), Some(profile(7, 1000)));
        assert_eq!(registry.get(8), None);
    }

    #[test]
    fn test_insert_replaces_existing_record() {
        let registry = ApplicationRegistry::new();
        registry.insert(profile(7, 1000));
        registry.insert(profile(7, 2000));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(7).unwrap().bandwidth, 2000);
    }

    #[test]
    fn test_remove() {
        let registry = ApplicationRegistry::new();
        registry.insert(profile(7, 1000));

        let removed = registry.remove(7).unwrap();
        assert_eq!(removed.app_id, 7);
        assert!(registry.is_empty());
        assert!(matches!(registry.remove(7), Err(RegistryError::NotFound(7))));
    }

    #[test]
    fn test_profile_deserialization() {
        let json = r#"{
            "app_id": 42,
            "jitter": 5,
            "packet_loss": 0,
            "packet_delay": 15,
            "bandwidth": 10000
        }"#;
        let p: AppProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.app_id, 42);
        assert_eq!(p.bandwidth, 10000);
    }
}
