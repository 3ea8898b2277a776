// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Application preferences persisted by Backboard (color scheme + server).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Storage name the application preferences are persisted under.
pub const PREFERENCES_KEY: &str = "preferences";

/// Schema version of [`AppPreferences`].
pub const PREFERENCES_VERSION: u32 = 0;

/// Saved preferences for the application window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppPreferences {
    /// Light or dark window chrome.
    #[serde(default)]
    pub color_scheme: ColorScheme,
    /// Base URL of the Blueboard server imports are sent to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueboard_url: Option<String>,
}

/// Window color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Light background, dark foreground.
    #[default]
    Light,
    /// Dark background, light foreground.
    Dark,
}

impl ColorScheme {
    /// The opposite scheme.
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Lowercase name, as persisted.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown color scheme name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color scheme {0:?} (expected \"light\" or \"dark\")")]
pub struct ParseColorSchemeError(String);

impl FromStr for ColorScheme {
    type Err = ParseColorSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("light") {
            Ok(Self::Light)
        } else if s.eq_ignore_ascii_case("dark") {
            Ok(Self::Dark)
        } else {
            Err(ParseColorSchemeError(s.to_owned()))
        }
    }
}
