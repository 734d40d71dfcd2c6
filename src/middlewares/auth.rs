use crate::error::AppError;
use crate::utils::JwtService;
use actix_web::http::Method;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

// 需要管理员令牌的路径
struct ProtectedPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
    // 受保护前缀下仍然公开的路径
    excluded_paths: Vec<&'static str>,
}

impl ProtectedPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec!["/api/admin"],
            prefix_paths: vec!["/api/admin/"],
            excluded_paths: vec!["/api/admin/login"],
        }
    }

    fn requires_admin(&self, path: &str) -> bool {
        if self.excluded_paths.contains(&path) {
            return false;
        }

        if self.exact_paths.contains(&path) {
            return true;
        }

        self.prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            protected_paths: ProtectedPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    protected_paths: ProtectedPaths,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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
        // 放行所有 CORS 预检请求
        if req.method() == Method::OPTIONS || !self.protected_paths.requires_admin(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let Some(token) = token else {
            let error = AppError::AuthError("Missing access token".to_string());
            return Box::pin(async move { Err(error.into()) });
        };

        match self.jwt_service.verify_admin_token(token) {
            Ok(_) => {
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(_) => {
                let error = AppError::AuthError("Invalid access token".to_string());
                Box::pin(async move { Err(error.into()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{TestRequest, init_service};
    use actix_web::{App, HttpResponse, web};

    #[test]
    fn test_protected_paths() {
        let paths = ProtectedPaths::new();
        assert!(paths.requires_admin("/api/admin/prizes"));
        assert!(paths.requires_admin("/api/admin/sounds/3/activate"));
        assert!(paths.requires_admin("/api/admin"));
        assert!(!paths.requires_admin("/api/admin/login"));
        assert!(!paths.requires_admin("/api/draw"));
        assert!(!paths.requires_admin("/api/administrator"));
        assert!(!paths.requires_admin("/swagger-ui/"));
    }

    #[actix_web::test]
    async fn test_admin_route_requires_valid_token() {
        let jwt = JwtService::new("secret", 60);
        let app = init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt.clone()))
                .route("/api/admin/stats", web::get().to(|| async { HttpResponse::Ok().finish() }))
                .route("/api/draw", web::post().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = TestRequest::post().uri("/api/draw").to_request();
        assert_eq!(app.call(req).await.unwrap().status(), StatusCode::OK);

        let req = TestRequest::get().uri("/api/admin/stats").to_request();
        let err = app.call(req).await.err().unwrap();
        assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);

        let forged = JwtService::new("other", 60).generate_admin_token().unwrap();
        let req = TestRequest::get()
            .uri("/api/admin/stats")
            .insert_header(("Authorization", format!("Bearer {forged}")))
            .to_request();
        assert!(app.call(req).await.is_err());

        let token = jwt.generate_admin_token().unwrap();
        let req = TestRequest::get()
            .uri("/api/admin/stats")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        assert_eq!(app.call(req).await.unwrap().status(), StatusCode::OK);
    }
}
