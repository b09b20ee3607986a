pub mod bill_view;
pub mod forum_comment_view;
pub mod forum_post_view;
pub mod member_vote_view;
pub mod role_view;
pub mod structs;
pub mod tally;
pub mod user_view;
