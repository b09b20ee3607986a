use actix_web::web::{Data, Json};
use coolbills_api_common::{
  context::CoolbillsContext,
  forum::SuccessResponse,
  user::{DeletePreference, Login, LoginResponse, PreferencesResponse, SetPreference, SetUsername},
  utils::{check_preference_name, check_username},
};
use coolbills_db_schema::source::{
  user::{User, UserInsertForm},
  user_preference::{UserPreference, UserPreferenceForm},
};
use coolbills_db_views::structs::UserView;
use coolbills_utils::{claims::Claims, error::CoolbillsResult};

/// Sign-in by email; the account is created on first sight. The upstream
/// identity provider has already verified the address by the time this
/// endpoint is reached.
#[tracing::instrument(skip(context, data))]
pub async fn login(
  data: Json<Login>,
  context: Data<CoolbillsContext>,
) -> CoolbillsResult<Json<LoginResponse>> {
  let user = match User::read_by_email(&mut context.pool(), &data.email).await? {
    Some(user) => user,
    None => {
      let name = data
        .name
        .clone()
        .unwrap_or_else(|| data.email.split('@').next().unwrap_or_default().to_string());
      User::create_or_read_by_email(&mut context.pool(), &UserInsertForm::new(&name, &data.email))
        .await?
    }
  };

  let settings = context.settings();
  let jwt = Claims::jwt(user.id.0, &settings.jwt_secret, &settings.hostname)?;

  Ok(Json(LoginResponse {
    jwt,
    registered: user.username.is_some(),
    user,
  }))
}

/// Claiming a username is a one-shot race: the unique index decides between
/// concurrent claimants and the loser gets a 409.
#[tracing::instrument(skip(context))]
pub async fn set_username(
  data: Json<SetUsername>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<LoginResponse>> {
  check_username(&data.username)?;

  let user = User::set_username(&mut context.pool(), user_view.user.id, &data.username).await?;

  let settings = context.settings();
  let jwt = Claims::jwt(user.id.0, &settings.jwt_secret, &settings.hostname)?;
  Ok(Json(LoginResponse {
    jwt,
    registered: true,
    user,
  }))
}

#[tracing::instrument(skip(context))]
pub async fn set_preference(
  data: Json<SetPreference>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<PreferencesResponse>> {
  check_preference_name(&data.name)?;

  let form = UserPreferenceForm {
    user_id: user_view.user.id,
    name: data.name.clone(),
    value: data.value.clone(),
  };
  UserPreference::upsert(&mut context.pool(), &form).await?;
  let preferences = UserPreference::list_for_user(&mut context.pool(), user_view.user.id).await?;

  Ok(Json(PreferencesResponse { preferences }))
}

#[tracing::instrument(skip(context))]
pub async fn list_preferences(
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<PreferencesResponse>> {
  let preferences = UserPreference::list_for_user(&mut context.pool(), user_view.user.id).await?;
  Ok(Json(PreferencesResponse { preferences }))
}

#[tracing::instrument(skip(context))]
pub async fn delete_preference(
  data: Json<DeletePreference>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<SuccessResponse>> {
  UserPreference::delete(&mut context.pool(), user_view.user.id, &data.name).await?;
  Ok(Json(SuccessResponse { success: true }))
}
