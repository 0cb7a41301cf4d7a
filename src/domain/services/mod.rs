pub mod cache_service;
pub mod content_renderer;
pub mod object_storage;
pub mod token_service;
pub mod view_renderer;
