use serde::{Deserialize, Serialize};

/// Category entity - groups products in the catalog.
///
/// `id` is `None` until the category has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
}

impl Category {
    /// Fields a category page may be ordered by.
    pub const SORTABLE_FIELDS: &'static [&'static str] = &["id", "name"];

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}
