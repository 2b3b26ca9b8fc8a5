//! Services - business rules on top of the repository ports.

mod auth;
mod category;
mod product;

pub use auth::{AuthService, mask_email};
pub use category::CategoryService;
pub use product::ProductService;
