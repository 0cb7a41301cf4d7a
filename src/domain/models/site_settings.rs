use std::collections::HashMap;

use serde_json::Value;

use crate::domain::{
    error::ConfigurationError,
    models::{avatar::AvatarNameBasis, trust_level::TrustLevels},
};

pub const AVATAR_NAME_BASIS: &str = "avatarNameBasis";
pub const AVATAR_PALETTE: &str = "avatarPalette";
pub const USE_GRAVATAR: &str = "useGravatar";
pub const GRAVATAR_DEFAULT: &str = "gravatarDefault";
pub const TRUST_LEVEL_ACTIONS: &str = "TrustLevels.allowedActions";

/// Typed view over the site's key/value settings table.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettings {
    pub avatar_name_basis: AvatarNameBasis,
    pub avatar_palette: Vec<String>,
    pub use_gravatar: bool,
    pub gravatar_default: String,
    pub trust_levels: TrustLevels,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            avatar_name_basis: AvatarNameBasis::Email,
            avatar_palette: Vec::new(),
            use_gravatar: false,
            gravatar_default: "identicon".to_string(),
            trust_levels: TrustLevels::default(),
        }
    }
}

impl SiteSettings {
    /// Build settings from raw `(key, value)` rows.
    ///
    /// Values are parsed as JSON first; anything that is not valid JSON is
    /// taken as a plain string. Unknown keys are ignored.
    pub fn from_entries<I>(entries: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings = Self::default();

        for (key, raw) in entries {
            let value = serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw));
            match key.as_str() {
                AVATAR_NAME_BASIS => {
                    settings.avatar_name_basis = match value.as_str() {
                        Some("name") => AvatarNameBasis::Name,
                        Some("email") => AvatarNameBasis::Email,
                        _ => return Err(invalid(&key, "expected \"name\" or \"email\"")),
                    };
                }
                AVATAR_PALETTE => {
                    settings.avatar_palette = serde_json::from_value(value)
                        .map_err(|e| invalid(&key, &e.to_string()))?;
                }
                USE_GRAVATAR => {
                    settings.use_gravatar = parse_flag(&value).ok_or_else(|| invalid(&key, "expected a boolean"))?;
                }
                GRAVATAR_DEFAULT => {
                    settings.gravatar_default = match value {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                }
                TRUST_LEVEL_ACTIONS => {
                    let levels: HashMap<i32, Vec<String>> = serde_json::from_value(value)
                        .map_err(|e| invalid(&key, &e.to_string()))?;
                    settings.trust_levels = TrustLevels::new(levels);
                }
                _ => {}
            }
        }

        Ok(settings)
    }
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.as_str() {
            "true" | "on" | "yes" => Some(true),
            "false" | "off" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn invalid(key: &str, reason: &str) -> ConfigurationError {
    ConfigurationError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
