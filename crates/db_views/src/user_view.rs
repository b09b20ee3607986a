use crate::structs::UserView;
use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use coolbills_db_schema::{
  newtypes::UserId,
  schema::{role, users},
  source::{role::Role, user::User},
  utils::{get_conn, DbPool},
};
use coolbills_utils::error::{CoolbillsError, CoolbillsErrorType, CoolbillsResult};
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use std::future::{ready, Ready};

impl UserView {
  pub async fn read(pool: &mut DbPool<'_>, user_id: UserId) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    let (user, role) = users::table
      .left_join(role::table)
      .filter(users::id.eq(user_id))
      .select((User::as_select(), Option::<Role>::as_select()))
      .first::<(User, Option<Role>)>(&mut *conn)
      .await?;
    Ok(UserView { user, role })
  }
}

impl FromRequest for UserView {
  type Error = CoolbillsError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(match req.extensions().get::<UserView>() {
      Some(c) => Ok(c.clone()),
      None => Err(CoolbillsErrorType::NotLoggedIn.into()),
    })
  }
}
