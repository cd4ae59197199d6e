//! Settings persistence coordination.
//!
//! Any serializable value can be stored in eframe's storage as a JSON
//! string under a key of its own.

use serde::{Deserialize, Serialize};

/// Coordinates persistence of serializable settings.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting, falling back to `default` if it is missing or no
    /// longer parses.
    ///
    /// # Examples
    /// ```ignore
    /// let layout: LayoutState = SettingsCoordinator::load_setting_or(
    ///     storage,
    ///     "layout",
    ///     LayoutState::new(),
    /// );
    /// ```
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        Self::try_load_setting(storage, key).unwrap_or(default)
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let storage = storage?;
        let json_str = storage.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ignoring stored setting {}: {}", key, e);
                None
            }
        }
    }

    /// Saves a setting to persistent storage.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => {
                storage.set_string(key, json_str);
                storage.flush();
            }
            Err(e) => log::warn!("could not store setting {}: {}", key, e),
        }
    }
}
