use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("User not found")]
    UserNotFound,

    #[error("User has not been saved yet")]
    UnsavedUser,

    #[error("Invalid avatar path: {0}")]
    InvalidAvatarPath(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete {path}: {source}")]
    Delete {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path escapes storage root: {0}")]
    InvalidPath(String),
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Avatar palette is empty")]
    EmptyAvatarPalette,

    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),
}
