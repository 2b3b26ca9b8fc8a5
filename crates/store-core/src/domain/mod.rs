//! Domain entities - the core business objects.

mod category;
mod product;
mod user;

pub use category::Category;
pub use product::{Product, ProductFilter};
pub use user::{Principal, Role, User};
