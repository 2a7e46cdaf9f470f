pub mod manager;
pub mod models;
pub mod repository;

pub use manager::DatabaseError;
pub use models::drink::{Drink, DrinkLong, DrinkShort, Ingredient};
pub use repository::DrinkRepository;
