use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::user::UserId;

/// How many login records a profile lists when no limit is given.
pub const DEFAULT_LOGIN_LIMIT: u64 = 10;

/// One successful sign-in, as recorded by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRecord {
    pub id: i64,
    pub user_id: UserId,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}
