pub mod admin;
pub mod forum;
pub mod legislation;
pub mod user;
