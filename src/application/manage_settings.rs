//! Settings management use case

use crate::application::Session;
use crate::domain::settings::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::domain::{Action, CustomLabels, FontTarget};
use crate::error::{RosetintError, Result};
use crate::infrastructure::KeyValueStore;
use std::str::FromStr;

const BACKGROUND_KEY: &str = "backgroundImageId";
const LOCK_SCREEN_KEY: &str = "lockScreenImageId";

/// Service for reading and changing blog settings
pub struct SettingsService<S> {
    session: Session<S>,
}

impl<S: KeyValueStore> SettingsService<S> {
    pub fn new(session: Session<S>) -> Self {
        SettingsService { session }
    }

    /// Get a single setting value
    pub fn get(&self, key: &str) -> Result<String> {
        let settings = &self.session.data().settings;

        if let Some(label) = settings.labels.get(key) {
            return Ok(label.to_string());
        }

        match key {
            BACKGROUND_KEY => Ok(settings.background_image_id.clone().unwrap_or_default()),
            LOCK_SCREEN_KEY => Ok(settings.lock_screen_image_id.clone().unwrap_or_default()),
            _ => {
                let target =
                    FontTarget::from_str(key).map_err(|_| RosetintError::UnknownSetting(key.to_string()))?;
                Ok(settings.font_size(target).to_string())
            }
        }
    }

    /// Set a setting value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let action = if let Some(labels) = self.session.data().settings.labels.with(key, value) {
            Action::SetLabels(labels)
        } else {
            match key {
                BACKGROUND_KEY | LOCK_SCREEN_KEY => {
                    return Err(RosetintError::Config(format!(
                        "'{}' is managed by 'rosetint image background' and 'rosetint image lock'",
                        key
                    )));
                }
                _ => {
                    let target = FontTarget::from_str(key)
                        .map_err(|_| RosetintError::UnknownSetting(key.to_string()))?;
                    Action::SetFontSize {
                        target,
                        size: parse_font_size(value)?,
                    }
                }
            }
        };

        self.session.dispatch(action)?;
        Ok(())
    }

    /// List all settings as key/value pairs
    pub fn list(&self) -> Vec<(String, String)> {
        let data = self.session.data();
        let settings = &data.settings;
        let image_label = |id: &Option<String>, resolved: Option<&str>| match (id, resolved) {
            (None, _) => String::new(),
            (Some(id), Some(name)) => format!("{} ({})", id, name),
            (Some(id), None) => format!("{} (missing)", id),
        };

        let mut entries = vec![
            (
                BACKGROUND_KEY.to_string(),
                image_label(
                    &settings.background_image_id,
                    data.background_image().map(|i| i.name.as_str()),
                ),
            ),
            (
                LOCK_SCREEN_KEY.to_string(),
                image_label(
                    &settings.lock_screen_image_id,
                    settings
                        .lock_screen_image_id
                        .as_deref()
                        .and_then(|id| data.image(id))
                        .map(|i| i.name.as_str()),
                ),
            ),
            (
                FontTarget::Editor.key().to_string(),
                settings.editor_font_size.to_string(),
            ),
            (
                FontTarget::Preview.key().to_string(),
                settings.preview_font_size.to_string(),
            ),
        ];

        for key in CustomLabels::KEYS {
            if let Some(value) = settings.labels.get(key) {
                entries.push((key.to_string(), value.to_string()));
            }
        }

        entries
    }
}

/// Font sizes are percentages between 50 and 200
fn parse_font_size(value: &str) -> Result<u32> {
    let trimmed = value.trim().trim_end_matches('%');
    match trimmed.parse::<u32>() {
        Ok(size) if (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) => Ok(size),
        _ => Err(RosetintError::InvalidValue(format!(
            "Font size must be a percentage from {} to {}, got '{}'",
            MIN_FONT_SIZE, MAX_FONT_SIZE, value
        ))),
    }
}
