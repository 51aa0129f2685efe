use chrono::{DateTime, Utc};
use log::info;

use crate::entity::{Template, TemplateConfig, TemplateFilter, ValidationError};
use crate::utils;

/// Saved templates, newest first. Templates are never edited in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted records, newest first.
    pub fn from_templates(mut templates: Vec<Template>) -> Self {
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self { templates }
    }

    pub fn create(
        &mut self,
        user_id: &str,
        name: &str,
        config: TemplateConfig,
        now: DateTime<Utc>,
    ) -> Result<Template, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyTemplateName);
        }

        let template = Template {
            template_id: utils::generate_id(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            config,
            created_at: now,
        };

        info!(
            "Created {} template '{}' ({})",
            template.template_type(),
            template.name,
            template.template_id
        );
        self.templates.insert(0, template.clone());
        Ok(template)
    }

    /// Removes the template if present. Unknown ids are ignored.
    pub fn delete(&mut self, template_id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.template_id != template_id);
        before != self.templates.len()
    }

    pub fn get(&self, template_id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.template_id == template_id)
    }

    /// Templates matching `filter` whose name contains `query`, ignoring case.
    /// The query is used as typed, whitespace included.
    pub fn list(&self, filter: TemplateFilter, query: &str) -> Vec<&Template> {
        let query = query.to_lowercase();
        self.templates
            .iter()
            .filter(|t| filter.matches(t.template_type()))
            .filter(|t| t.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
