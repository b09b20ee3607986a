use actix_web::web;
use coolbills_api::{
  admin::{
    assign_user_role,
    create_permission,
    create_role,
    get_role,
    list_permissions,
    list_roles,
    update_role_permission,
  },
  forum::{
    comment::{create_comment, delete_comment, edit_comment},
    post::{
      bookmark_post,
      create_post,
      delete_post,
      get_post,
      list_posts,
      lock_post,
      pin_post,
    },
    vote::{comment_vote, post_vote},
  },
  legislation::{
    bill_tallies,
    favorite_member,
    list_favorites,
    roll_call_tally,
    search_bills,
    search_member_votes,
  },
  user::{delete_preference, list_preferences, login, set_preference, set_username},
};

pub fn config(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .service(
        web::scope("/admin")
          .route("/role", web::post().to(create_role))
          .route("/role/list", web::get().to(list_roles))
          .route("/role/{role_id}", web::get().to(get_role))
          .route("/role/permission", web::post().to(update_role_permission))
          .route("/permission", web::post().to(create_permission))
          .route("/permission/list", web::get().to(list_permissions))
          .route("/user/role", web::post().to(assign_user_role)),
      )
      .service(
        web::scope("/forum")
          .route("/post", web::post().to(create_post))
          .route("/post/list", web::get().to(list_posts))
          .route("/post/delete", web::post().to(delete_post))
          .route("/post/lock", web::post().to(lock_post))
          .route("/post/pin", web::post().to(pin_post))
          .route("/post/bookmark", web::post().to(bookmark_post))
          .route("/post/{post_id}", web::get().to(get_post))
          .route("/post-vote", web::post().to(post_vote))
          .route("/comment", web::post().to(create_comment))
          .route("/comment", web::put().to(edit_comment))
          .route("/comment/delete", web::post().to(delete_comment))
          .route("/comment-vote", web::post().to(comment_vote)),
      )
      .service(
        web::scope("/legislation")
          .route("/search", web::get().to(search_bills))
          .route("/bill/{bill_id}/tallies", web::get().to(bill_tallies))
          .route(
            "/roll-call/{roll_call_id}/tally",
            web::get().to(roll_call_tally),
          ),
      )
      .service(
        web::scope("/congress")
          .route("/vote-search", web::get().to(search_member_votes))
          .route("/favorite", web::post().to(favorite_member))
          .route("/favorites", web::get().to(list_favorites)),
      )
      .service(
        web::scope("/user")
          .route("/login", web::post().to(login))
          .route("/set-username", web::post().to(set_username))
          .route("/preference", web::post().to(set_preference))
          .route("/preference/delete", web::post().to(delete_preference))
          .route("/preferences", web::get().to(list_preferences)),
      ),
  );
}
