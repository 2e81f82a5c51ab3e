use tracing::info;

use pedss_core::models::settings::{Profile, Settings, SettingsPatch};
use pedss_core::store_keys;

use crate::error::StorageError;
use crate::state;
use crate::store::Store;

/// User preference flags. Reads never fail on a missing record; the
/// documented defaults are returned instead.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    store: Store,
}

impl SettingsStore {
    pub fn new(store: Store) -> Self {
        SettingsStore { store }
    }

    pub async fn get(&self) -> Result<Settings, StorageError> {
        state::load_state_or_default(&self.store, store_keys::SETTINGS).await
    }

    /// Merge a patch into the stored settings and persist the result.
    pub async fn save(&self, patch: SettingsPatch) -> Result<Settings, StorageError> {
        let mut settings = self.get().await?;
        settings.apply(patch);
        state::save_state(&self.store, store_keys::SETTINGS, &settings).await?;
        info!("saved settings");
        Ok(settings)
    }
}

/// Clinician profile record. Free-form; an absent record reads as an
/// empty profile.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    store: Store,
}

impl ProfileStore {
    pub fn new(store: Store) -> Self {
        ProfileStore { store }
    }

    pub async fn get(&self) -> Result<Profile, StorageError> {
        state::load_state_or_default(&self.store, store_keys::PROFILE).await
    }

    pub async fn save(&self, profile: &Profile) -> Result<(), StorageError> {
        state::save_state(&self.store, store_keys::PROFILE, profile).await?;
        info!("saved profile");
        Ok(())
    }
}
