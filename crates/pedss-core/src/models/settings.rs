use serde::{Deserialize, Serialize};
use ts_rs::TS;

fn default_true() -> bool {
    true
}

/// User preference flags.
///
/// Serde defaults match [`Settings::default`] so a settings record written
/// by an older build that lacked a flag still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default = "default_true")]
    pub auto_save: bool,
    #[serde(default)]
    pub data_sync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            notifications: true,
            dark_mode: false,
            auto_save: true,
            data_sync: false,
        }
    }
}

impl Settings {
    /// Merge a patch into the current settings, leaving unset fields alone.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.notifications {
            self.notifications = v;
        }
        if let Some(v) = patch.dark_mode {
            self.dark_mode = v;
        }
        if let Some(v) = patch.auto_save {
            self.auto_save = v;
        }
        if let Some(v) = patch.data_sync {
            self.data_sync = v;
        }
    }
}

/// Partial settings update; `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SettingsPatch {
    pub notifications: Option<bool>,
    pub dark_mode: Option<bool>,
    pub auto_save: Option<bool>,
    pub data_sync: Option<bool>,
}

/// Free-form clinician metadata shown on the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub hospital: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();
        assert!(settings.notifications);
        assert!(!settings.dark_mode);
        assert!(settings.auto_save);
        assert!(!settings.data_sync);
    }

    #[test]
    fn apply_only_touches_set_fields() {
        let mut settings = Settings::default();
        settings.apply(SettingsPatch {
            dark_mode: Some(true),
            ..SettingsPatch::default()
        });
        assert!(settings.dark_mode);
        assert!(settings.notifications);
        assert!(settings.auto_save);
    }

    #[test]
    fn partial_record_fills_in_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"dark_mode": true}"#).unwrap();
        assert!(settings.dark_mode);
        assert!(settings.notifications);
        assert!(settings.auto_save);
        assert!(!settings.data_sync);
    }
}
