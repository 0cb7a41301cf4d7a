use crate::domain::{error::DomainError, models::avatar::AvatarView};

/// Renders view fragments the entity hands out as markup.
pub trait ViewRenderer: Send + Sync {
    fn render_avatar(&self, view: &AvatarView) -> Result<String, DomainError>;
}
