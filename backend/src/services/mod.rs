//! Business logic services for Stocky

pub mod auth;
pub mod category;
pub mod movement;
pub mod product;
pub mod seed;
pub mod supplier;
pub mod task;
pub mod user;

pub use auth::AuthService;
pub use category::CategoryService;
pub use movement::MovementService;
pub use product::ProductService;
pub use supplier::SupplierService;
pub use task::TaskService;
pub use user::UserService;

use crate::error::{AppError, AppResult};

/// Lift a field check from `shared::validation` into a 400 on `field`
pub(crate) fn ensure(field: &str, check: Result<(), &'static str>) -> AppResult<()> {
    check.map_err(|message| AppError::validation(field, message))
}
