pub mod admin;
pub mod context;
pub mod forum;
pub mod legislation;
pub mod user;
pub mod utils;
