use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Group whose members pass every trust check.
pub const SUPERADMIN_GROUP: &str = "superadmin";

/// Action gating whether links survive in a rendered signature.
pub const LINK_SIGNATURE: &str = "link-signature";

/// Allowed actions per trust level, as configured under `TrustLevels.allowedActions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustLevels(HashMap<i32, Vec<String>>);

impl TrustLevels {
    pub fn new(levels: HashMap<i32, Vec<String>>) -> Self {
        Self(levels)
    }

    /// `None` when the level is not configured at all.
    pub fn allowed_actions(&self, level: i32) -> Option<&[String]> {
        self.0.get(&level).map(Vec::as_slice)
    }

    /// Unknown levels deny everything.
    pub fn allows(&self, level: i32, action: &str) -> bool {
        self.allowed_actions(level)
            .is_some_and(|actions| actions.iter().any(|a| a == action))
    }
}
