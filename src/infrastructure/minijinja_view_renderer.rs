use minijinja::Environment;

use crate::domain::{
    error::DomainError, models::avatar::AvatarView, services::view_renderer::ViewRenderer,
};

const AVATAR_TEMPLATE_NAME: &str = "avatar.html";

const AVATAR_TEMPLATE: &str = r#"<span class="avatar avatar-initials" data-user-id="{{ user.id }}" data-username="{{ user.username }}" style="width: {{ size }}px; height: {{ size }}px; line-height: {{ size }}px; font-size: {{ font_size }}px; background-color: {{ color }};">{{ initials }}</span>"#;

/// Renders view fragments with minijinja. `.html` templates are auto-escaped.
pub struct MiniJinjaViewRenderer {
    env: Environment<'static>,
}

impl MiniJinjaViewRenderer {
    pub fn new() -> Result<Self, DomainError> {
        let mut env = Environment::new();
        env.add_template(AVATAR_TEMPLATE_NAME, AVATAR_TEMPLATE)
            .map_err(|e| DomainError::Render(e.to_string()))?;
        Ok(Self { env })
    }
}

impl ViewRenderer for MiniJinjaViewRenderer {
    fn render_avatar(&self, view: &AvatarView) -> Result<String, DomainError> {
        self.env
            .get_template(AVATAR_TEMPLATE_NAME)
            .and_then(|template| template.render(view))
            .map_err(|e| DomainError::Render(e.to_string()))
    }
}
