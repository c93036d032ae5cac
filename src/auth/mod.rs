pub mod credentials;
pub mod extract;
pub mod token;
