// src/api/middleware/auth.rs

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::sync::Arc;
use crate::api::utils::{bearer_token, Identity};
use crate::core::vault::Vault;
use log::{debug, error};

/// Resolves the bearer token, if any, into an `Identity` request extension.
/// Never rejects a request: handlers decide what anonymity means for them.
pub struct IdentityResolver;

impl<S, B> Transform<S, ServiceRequest> for IdentityResolver
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentityResolverMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentityResolverMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct IdentityResolverMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for IdentityResolverMiddleware<S>
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
        let service = Rc::clone(&self.service);

        let identity = match req.app_data::<web::Data<Arc<Vault>>>() {
            Some(vault) => vault.current_identity(bearer_token(req.headers())),
            None => {
                error!("❌ Vault is not registered as app data; treating request as anonymous");
                None
            }
        };

        match identity {
            Some(owner_id) => {
                debug!("✅ Request authenticated as {}", owner_id);
                req.extensions_mut().insert(Identity(owner_id));
            }
            None => debug!("Anonymous request to {}", req.path()),
        }

        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res)
        })
    }
}
