pub mod avatar;
pub mod login;
pub mod reaction;
pub mod site_settings;
pub mod trust_level;
pub mod urls;
pub mod user;
