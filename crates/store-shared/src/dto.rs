//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use validator::Validate;

use store_core::domain::{Category, Product};
use store_core::paging::{DEFAULT_DIRECTION, DEFAULT_LINES_PER_PAGE, DEFAULT_ORDER_BY};

/// Wire projection of a category: identity and name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CategoryDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[validate(length(min = 5, max = 80, message = "Name must be between 5 and 80 characters"))]
    pub name: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
        }
    }
}

/// Wire projection of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: Option<i32>,
    pub name: String,
    pub price: f64,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
        }
    }
}

/// A category together with the products it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDetailsResponse {
    pub id: Option<i32>,
    pub name: String,
    pub products: Vec<ProductDto>,
}

impl CategoryDetailsResponse {
    pub fn new(category: Category, products: Vec<Product>) -> Self {
        Self {
            id: category.id,
            name: category.name,
            products: products.into_iter().map(ProductDto::from).collect(),
        }
    }
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

fn default_lines_per_page() -> u64 {
    DEFAULT_LINES_PER_PAGE
}

fn default_direction() -> String {
    DEFAULT_DIRECTION.to_string()
}

fn default_order_by() -> String {
    DEFAULT_ORDER_BY.to_string()
}

/// Query string of a paged listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: u64,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default = "default_order_by")]
    pub order_by: String,
}

/// Query string of the product search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchParams {
    #[serde(default)]
    pub name: String,
    /// Comma-separated category ids.
    #[serde(default)]
    pub categories: String,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: u64,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default = "default_order_by")]
    pub order_by: String,
}

impl ProductSearchParams {
    /// Parse the `categories` list, e.g. `"1,3"`.
    pub fn category_ids(&self) -> Result<Vec<i32>, String> {
        self.categories
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i32>()
                    .map_err(|_| format!("invalid category id '{s}'"))
            })
            .collect()
    }
}
