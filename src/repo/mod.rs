pub mod products;
pub mod texts;
