//! Domain models for Stocky

mod category;
mod movement;
mod product;
mod supplier;
mod task;
mod user;

pub use category::*;
pub use movement::*;
pub use product::*;
pub use supplier::*;
pub use task::*;
pub use user::*;
