//! sea-orm entities for the tables this service reads.

pub mod daily_visits;
pub mod group_user;
pub mod groups;
pub mod login_histories;
pub mod posts;
pub mod reactions;
pub mod settings;
pub mod threads;
pub mod users;
