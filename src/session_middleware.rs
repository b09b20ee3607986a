use actix_web::{
  body::MessageBody,
  dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
  Error,
  HttpMessage,
};
use coolbills_api_common::context::CoolbillsContext;
use coolbills_db_schema::newtypes::UserId;
use coolbills_db_views::structs::UserView;
use coolbills_utils::{claims::Claims, error::CoolbillsResult};
use core::future::Ready;
use futures_util::future::LocalBoxFuture;
use std::{future::ready, rc::Rc};

static AUTH_COOKIE_NAME: &str = "auth";

/// Reads the session token from the `auth` header or cookie, resolves it to
/// a `UserView` and stashes it in request extensions. Handlers pull it back
/// out through the `UserView: FromRequest` impl.
#[derive(Clone)]
pub struct SessionMiddleware {
  context: CoolbillsContext,
}

impl SessionMiddleware {
  pub fn new(context: CoolbillsContext) -> Self {
    SessionMiddleware { context }
  }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = SessionService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(SessionService {
      service: Rc::new(service),
      context: self.context.clone(),
    }))
  }
}

pub struct SessionService<S> {
  service: Rc<S>,
  context: CoolbillsContext,
}

impl<S, B> Service<ServiceRequest> for SessionService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let svc = self.service.clone();
    let context = self.context.clone();

    Box::pin(async move {
      let jwt = req
        .headers()
        .get(AUTH_COOKIE_NAME)
        .and_then(|h| h.to_str().ok())
        .map(ToString::to_string)
        .or_else(|| req.cookie(AUTH_COOKIE_NAME).map(|c| c.value().to_string()));

      if let Some(jwt) = &jwt {
        // An invalid or stale token degrades to an anonymous request instead
        // of failing it; endpoints that need auth still answer 401.
        if let Ok(user_view) = user_view_from_jwt(jwt, &context).await {
          req.extensions_mut().insert(user_view);
        }
      }

      svc.call(req).await
    })
  }
}

async fn user_view_from_jwt(jwt: &str, context: &CoolbillsContext) -> CoolbillsResult<UserView> {
  let claims = Claims::decode(jwt, &context.settings().jwt_secret)?;
  let user_id = UserId(claims.sub);
  UserView::read(&mut context.pool(), user_id).await
}
