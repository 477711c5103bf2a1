// src/application/admin.rs
//! Admin site configuration.
//!
//! Every entity the admin can edit is registered explicitly in an [`AdminSite`]
//! table. The generic admin HTTP component reads this table to decide which
//! columns a change list shows, how the edit form is grouped, which fields are
//! derived from others and which related rows are edited inline.

use crate::application::error::{ApplicationError, ApplicationResult};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub const CATEGORY_ENTITY: &str = "category";
pub const ARTICLE_ENTITY: &str = "article";
pub const ARTICLE_IMAGE_ENTITY: &str = "article_image";

/// A titled group of fields on an edit form.
pub const COLLAPSED_CLASSES: &str = "grp-collapse grp-closed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Fieldset {
    pub name: String,
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
}

impl Fieldset {
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            classes: Vec::new(),
        }
    }

    /// Rendered folded until the editor opens it.
    pub fn collapsed(mut self) -> Self {
        self.classes = vec![COLLAPSED_CLASSES.into()];
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InlineLayout {
    Tabular,
    Stacked,
}

/// Rows of a dependent entity edited on the parent's form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct InlineAdmin {
    pub entity: String,
    pub layout: InlineLayout,
    /// Blank rows offered in addition to the existing ones.
    pub extra: u32,
    pub fieldsets: Vec<Fieldset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ModelAdmin {
    pub entity: String,
    pub list_display: Vec<String>,
    pub fieldsets: Vec<Fieldset>,
    /// Target field -> source fields it is derived from.
    pub prepopulated_fields: BTreeMap<String, Vec<String>>,
    /// Foreign keys edited as a bare id instead of a select box.
    pub raw_id_fields: Vec<String>,
    pub inlines: Vec<InlineAdmin>,
}

impl ModelAdmin {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            list_display: Vec::new(),
            fieldsets: Vec::new(),
            prepopulated_fields: BTreeMap::new(),
            raw_id_fields: Vec::new(),
            inlines: Vec::new(),
        }
    }

    pub fn list_display<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_display = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn fieldset(mut self, fieldset: Fieldset) -> Self {
        self.fieldsets.push(fieldset);
        self
    }

    pub fn prepopulated<I, S>(mut self, target: impl Into<String>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prepopulated_fields.insert(
            target.into(),
            sources.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn raw_id_field(mut self, field: impl Into<String>) -> Self {
        self.raw_id_fields.push(field.into());
        self
    }

    pub fn inline(mut self, inline: InlineAdmin) -> Self {
        self.inlines.push(inline);
        self
    }

    /// Fields `target` is derived from, if it is prepopulated.
    pub fn prepopulated_sources(&self, target: &str) -> Option<&[String]> {
        self.prepopulated_fields.get(target).map(Vec::as_slice)
    }

    /// Every field that appears on the edit form, in form order.
    pub fn editable_fields(&self) -> impl Iterator<Item = &str> {
        self.fieldsets
            .iter()
            .flat_map(|set| set.fields.iter().map(String::as_str))
    }

    /// Reduce a serialized record to its primary key and change-list columns.
    pub fn change_list_row(&self, record: &Value) -> Map<String, Value> {
        let mut row = Map::new();
        if let Some(id) = record.get("id") {
            row.insert("id".into(), id.clone());
        }
        for column in &self.list_display {
            let value = record.get(column).cloned().unwrap_or(Value::Null);
            row.insert(column.clone(), value);
        }
        row
    }
}

/// The registry of administrable entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct AdminSite {
    models: Vec<ModelAdmin>,
}

impl AdminSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, model: ModelAdmin) -> ApplicationResult<()> {
        if self.get(&model.entity).is_some() {
            return Err(ApplicationError::conflict(format!(
                "{} is already registered",
                model.entity
            )));
        }
        for target in model.prepopulated_fields.keys() {
            if !model.editable_fields().any(|field| field == target) {
                return Err(ApplicationError::validation(format!(
                    "prepopulated field {target} is not on the {} form",
                    model.entity
                )));
            }
        }
        self.models.push(model);
        Ok(())
    }

    pub fn get(&self, entity: &str) -> Option<&ModelAdmin> {
        self.models.iter().find(|model| model.entity == entity)
    }

    pub fn models(&self) -> &[ModelAdmin] {
        &self.models
    }

    /// Registrations for the blog's categories and articles.
    pub fn blog() -> ApplicationResult<Self> {
        let mut site = Self::new();

        site.register(
            ModelAdmin::new(CATEGORY_ENTITY)
                .list_display(["category", "slug"])
                .prepopulated("slug", ["category"])
                .fieldset(Fieldset::new("Основне", ["category", "slug"])),
        )?;

        site.register(
            ModelAdmin::new(ARTICLE_ENTITY)
                .list_display(["title", "pub_date", "slug", "main_page", "category"])
                .prepopulated("slug", ["title"])
                .raw_id_field("category")
                .fieldset(Fieldset::new(
                    "Основне",
                    ["pub_date", "title", "description", "main_page", "category"],
                ))
                .fieldset(Fieldset::new("Додатково", ["slug"]).collapsed())
                .inline(InlineAdmin {
                    entity: ARTICLE_IMAGE_ENTITY.into(),
                    layout: InlineLayout::Tabular,
                    extra: 0,
                    fieldsets: vec![Fieldset::new("Зображення", ["title", "image"])],
                }),
        )?;

        Ok(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn article_extra_fieldset_starts_collapsed() {
        let site = AdminSite::blog().unwrap();
        let article = site.get(ARTICLE_ENTITY).unwrap();
        let extra = article
            .fieldsets
            .iter()
            .find(|fieldset| fieldset.name == "Додатково")
            .unwrap();
        assert_eq!(extra.fields, vec!["slug".to_string()]);
        assert_eq!(extra.classes, vec!["grp-collapse grp-closed".to_string()]);
    }

    #[test]
    fn blog_site_registers_both_entities() {
        let site = AdminSite::blog().unwrap();
        let article = site.get(ARTICLE_ENTITY).unwrap();
        assert_eq!(
            article.list_display,
            vec!["title", "pub_date", "slug", "main_page", "category"]
        );
        assert_eq!(article.prepopulated_sources("slug"), Some(&["title".to_string()][..]));
        assert_eq!(article.raw_id_fields, vec!["category"]);
        assert_eq!(article.inlines[0].entity, ARTICLE_IMAGE_ENTITY);
        assert_eq!(article.inlines[0].extra, 0);

        let category = site.get(CATEGORY_ENTITY).unwrap();
        assert_eq!(
            category.prepopulated_sources("slug"),
            Some(&["category".to_string()][..])
        );
        assert!(site.get("user").is_none());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut site = AdminSite::new();
        site.register(ModelAdmin::new("category")).unwrap();
        let err = site.register(ModelAdmin::new("category")).unwrap_err();
        assert!(matches!(err, ApplicationError::Conflict(_)));
    }

    #[test]
    fn prepopulated_target_must_be_on_form() {
        let mut site = AdminSite::new();
        let err = site
            .register(ModelAdmin::new("category").prepopulated("slug", ["category"]))
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }

    #[test]
    fn change_list_row_projects_columns() {
        let site = AdminSite::blog().unwrap();
        let category = site.get(CATEGORY_ENTITY).unwrap();
        let row = category.change_list_row(&json!({
            "id": 3,
            "category": "News",
            "slug": "news",
            "ignored": true
        }));
        assert_eq!(row.len(), 3);
        assert_eq!(row["id"], json!(3));
        assert_eq!(row["slug"], json!("news"));
        assert!(!row.contains_key("ignored"));
    }
}
