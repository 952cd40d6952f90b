//! HTTP request handlers

pub mod auth;
pub mod category;
pub mod health;
pub mod movement;
pub mod product;
pub mod supplier;
pub mod task;
pub mod user;

pub use auth::*;
pub use category::*;
pub use health::*;
pub use movement::*;
pub use product::*;
pub use supplier::*;
pub use task::*;
pub use user::*;

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor whose rejections use the API error format
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
