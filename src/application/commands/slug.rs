// src/application/commands/slug.rs
use std::sync::Arc;

use crate::{
    application::{
        admin::AdminSite,
        error::{ApplicationError, ApplicationResult},
        ports::util::SlugGenerator,
    },
    domain::slug::truncate_slug,
};

/// Fills in a slug the admin left blank, from the source fields the admin
/// site registers for it.
pub struct SlugPrepopulator {
    site: Arc<AdminSite>,
    generator: Arc<dyn SlugGenerator>,
}

impl SlugPrepopulator {
    pub fn new(site: Arc<AdminSite>, generator: Arc<dyn SlugGenerator>) -> Self {
        Self { site, generator }
    }

    /// The explicit slug when one was given, otherwise one derived from `values`.
    pub fn slug_for(
        &self,
        entity: &str,
        explicit: Option<String>,
        values: &[(&str, &str)],
    ) -> ApplicationResult<String> {
        match explicit.map(|s| s.trim().to_string()) {
            Some(slug) if !slug.is_empty() => Ok(slug),
            _ => self.prepopulate(entity, values),
        }
    }

    fn prepopulate(&self, entity: &str, values: &[(&str, &str)]) -> ApplicationResult<String> {
        let sources = self
            .site
            .get(entity)
            .and_then(|model| model.prepopulated_sources("slug"))
            .ok_or_else(|| ApplicationError::validation("slug is required"))?;

        let source_text = sources
            .iter()
            .filter_map(|field| {
                values
                    .iter()
                    .find(|(name, _)| *name == field.as_str())
                    .map(|(_, value)| *value)
            })
            .collect::<Vec<_>>()
            .join(" ");

        let slug = truncate_slug(&self.generator.slugify(&source_text));
        if slug.is_empty() {
            return Err(ApplicationError::validation(format!(
                "slug could not be derived from {}; provide one",
                sources.join(", ")
            )));
        }
        Ok(slug)
    }
}
