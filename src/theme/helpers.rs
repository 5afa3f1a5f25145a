use serde::{Deserialize, Serialize};

use crate::internal_error::{InternalResult, Rejection};
use crate::store::data::{KeyValueStore, THEME_KEY};

pub const THEMES: &[&str] = &["light", "dark", "forest", "ocean", "cyberpunk", "sunset"];
pub const DEFAULT_THEME: &str = "light";

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ThemeResponse {
    pub theme: String,
    pub themes: &'static [&'static str],
}

#[derive(Deserialize, Debug)]
pub struct SetThemeRequest {
    pub theme: String,
}

/// The selected theme name, kept in local storage across sessions.
pub struct ThemeSettings {
    store: Box<dyn KeyValueStore + Sync>,
}

impl ThemeSettings {
    pub fn new(store: impl KeyValueStore + Sync + 'static) -> ThemeSettings {
        ThemeSettings {
            store: Box::new(store),
        }
    }

    pub fn current(&self) -> String {
        match self.store.get(THEME_KEY) {
            Ok(Some(theme)) if THEMES.contains(&theme.as_str()) => theme,
            Ok(_) => DEFAULT_THEME.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read theme, using default");
                DEFAULT_THEME.to_string()
            }
        }
    }

    pub fn set(&self, theme: &str) -> InternalResult<String> {
        if !THEMES.contains(&theme) {
            return Err(Rejection::UnknownTheme(theme.to_string()).into());
        }

        self.store.set(THEME_KEY, theme)?;
        tracing::debug!(theme, "theme changed");

        Ok(theme.to_string())
    }

    /// The light/dark switch: dark goes to light, anything else to dark.
    pub fn toggle_dark(&self) -> InternalResult<String> {
        let next = if self.current() == "dark" { "light" } else { "dark" };
        self.set(next)
    }

    pub fn response(&self) -> ThemeResponse {
        ThemeResponse {
            theme: self.current(),
            themes: THEMES,
        }
    }
}
