pub mod enums;
pub mod newtypes;
pub mod schema;
pub mod schema_setup;
pub mod source;
pub mod traits;
pub mod utils;

pub mod impls;
