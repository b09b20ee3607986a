pub mod forum_comment;
pub mod forum_post;
pub mod legislation;
pub mod permission;
pub mod role;
pub mod user;
pub mod user_preference;
