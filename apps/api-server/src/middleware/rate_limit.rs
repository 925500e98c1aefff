//! Rate limiting middleware.
//!
//! Wraps a route scope with a fixed-window check for one action class. The
//! counter is keyed by the authenticated user when the request carries a
//! valid token, else by the client IP. A denial short-circuits with 429 and a
//! Retry-After hint; a counter-store failure has already failed open inside
//! the limiter, so the request proceeds.

use actix_web::{
    Error, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use palisade_core::moderation::{ActionClass, ClientKey, RateLimitDecision, RateLimiter};
use palisade_core::ports::TokenService;

use super::auth::bearer_token;
use super::error::AppError;

/// Rate limiting middleware factory.
pub struct RateLimitMiddleware {
    limiter: Arc<RateLimiter>,
    tokens: Arc<dyn TokenService>,
    class: ActionClass,
}

impl RateLimitMiddleware {
    pub fn new(
        limiter: Arc<RateLimiter>,
        tokens: Arc<dyn TokenService>,
        class: ActionClass,
    ) -> Self {
        Self {
            limiter,
            tokens,
            class,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            tokens: self.tokens.clone(),
            class: self.class,
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter>,
    tokens: Arc<dyn TokenService>,
    class: ActionClass,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let limiter = self.limiter.clone();
        let class = self.class;
        let client = client_key(&req, self.tokens.as_ref());

        Box::pin(async move {
            match limiter.check(class, &client).await {
                RateLimitDecision::Denied { retry_after, .. } => {
                    let response = AppError::RateLimited {
                        retry_after_secs: retry_after.as_secs().max(1),
                    }
                    .error_response();

                    let (http_req, _payload) = req.into_parts();
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                }
                RateLimitDecision::Allowed { .. } => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}

/// Prefer the authenticated user id over the client IP, so one abusive
/// account cannot rotate IPs and a shared NAT does not throttle unrelated
/// logged-in users. Invalid tokens fall back to the IP; the handler's own
/// auth extractor rejects them properly.
fn client_key(req: &ServiceRequest, tokens: &dyn TokenService) -> ClientKey {
    if let Ok(token) = bearer_token(req.request()) {
        if let Ok(claims) = tokens.validate_token(token) {
            return ClientKey::User(claims.user_id);
        }
    }

    let ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();
    ClientKey::Ip(ip)
}
