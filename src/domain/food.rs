use serde::{Deserialize, Serialize};

/// A dish as served by `/foods`.
///
/// Everything except the id is optional on the wire; renderers substitute
/// placeholder text for missing values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Food {
    #[serde(default)]
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub restaurant_id: Option<u64>,
    pub available: Option<bool>,
}

impl Food {
    pub fn new(id: u64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: Some(name.into()),
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    #[allow(dead_code)]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Case-insensitive substring match over name, description and tags.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        let hit = |value: &Option<String>| {
            value
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(needle))
        };

        hit(&self.name)
            || hit(&self.description)
            || self
                .tags
                .as_deref()
                .unwrap_or_default()
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}
