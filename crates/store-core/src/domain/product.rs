use serde::{Deserialize, Serialize};

/// Product entity - belongs to exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    pub price: f64,
    pub category_id: i32,
}

impl Product {
    /// Fields a product page may be ordered by.
    pub const SORTABLE_FIELDS: &'static [&'static str] = &["id", "name", "price"];

    pub fn new(name: impl Into<String>, price: f64, category_id: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            category_id,
        }
    }
}

/// Search criteria for the product catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name; empty matches all.
    pub name: String,
    /// Owning categories; empty matches any category.
    pub category_ids: Vec<i32>,
}

impl ProductFilter {
    /// Whether `product` satisfies this filter.
    pub fn matches(&self, product: &Product) -> bool {
        let name_matches = self.name.is_empty()
            || product
                .name
                .to_lowercase()
                .contains(&self.name.to_lowercase());
        let category_matches =
            self.category_ids.is_empty() || self.category_ids.contains(&product.category_id);

        name_matches && category_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_name_case_insensitively() {
        let product = Product::new("Mouse Gamer", 80.0, 1);
        let filter = ProductFilter {
            name: "mouse".to_string(),
            category_ids: vec![],
        };

        assert!(filter.matches(&product));
    }

    #[test]
    fn test_filter_restricts_categories() {
        let product = Product::new("Mouse", 80.0, 2);
        let filter = ProductFilter {
            name: String::new(),
            category_ids: vec![1, 3],
        };

        assert!(!filter.matches(&product));
        assert!(ProductFilter::default().matches(&product));
    }

    #[test]
    fn test_filter_treats_wildcards_literally() {
        let filter = ProductFilter {
            name: "50%_off".to_string(),
            category_ids: vec![],
        };

        assert!(!filter.matches(&Product::new("500 units off", 10.0, 1)));
        assert!(filter.matches(&Product::new("Cupom 50%_OFF", 10.0, 1)));
    }
}
