use std::future::{ready, Ready};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{models::Claims, AppState};

/// Decodes the `Authorization: Bearer` session JWT and, when valid, inserts
/// the `SessionUser` identity into request extensions. It never rejects:
/// handlers that require identity check for its presence themselves, so
/// public and session-bound routes can share one scope.
#[derive(Clone)]
pub struct ExtractSession {
    app_data: web::Data<AppState>,
}

impl ExtractSession {
    pub fn new(app_data: web::Data<AppState>) -> Self {
        Self { app_data }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ExtractSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ExtractSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ExtractSessionMiddleware {
            service,
            app_data: self.app_data.clone(),
        }))
    }
}

pub struct ExtractSessionMiddleware<S> {
    service: S,
    app_data: web::Data<AppState>,
}

impl<S, B> Service<ServiceRequest> for ExtractSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_owned);

        if let Some(token) = token {
            if let Ok(data) = decode::<Claims>(
                &token,
                &DecodingKey::from_secret(self.app_data.jwt_secret.as_bytes()),
                &Validation::default(),
            ) {
                req.extensions_mut().insert(data.claims.user);
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}
