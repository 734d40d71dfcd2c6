use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::SoundType;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::draw::get_prizes,
        handlers::draw::get_pool,
        handlers::draw::draw,
        handlers::draw::get_config,
        handlers::draw::get_sounds,
        handlers::admin::login,
        handlers::admin::change_password,
        handlers::admin::list_prizes,
        handlers::admin::create_prize,
        handlers::admin::update_prize,
        handlers::admin::delete_prize,
        handlers::admin::get_config,
        handlers::admin::update_config,
        handlers::admin::set_egg_image,
        handlers::admin::set_smashed_image,
        handlers::admin::list_records,
        handlers::admin::get_stats,
        handlers::admin::list_sounds,
        handlers::admin::create_sound,
        handlers::admin::update_sound,
        handlers::admin::delete_sound,
        handlers::admin::activate_sound,
    ),
    components(
        schemas(
            PublicPrizeResponse,
            PrizeResponse,
            PrizeRequest,
            WonPrize,
            DrawResponse,
            EggConfigResponse,
            UpdateEggConfigRequest,
            SmashEffect,
            ImageUrlRequest,
            ImageUrlResponse,
            DrawRecordResponse,
            RecordQuery,
            PrizeStock,
            StatsResponse,
            SoundType,
            SoundResponse,
            ActiveSound,
            ActiveSoundsResponse,
            CreateSoundRequest,
            UpdateSoundRequest,
            AdminLoginRequest,
            AdminLoginResponse,
            ChangePasswordRequest,
            CreatedResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "draw", description = "Egg smashing lucky draw API"),
        (name = "admin", description = "Prize, sound and configuration management API"),
    ),
    info(
        title = "Egg Draw API",
        version = "0.1.0",
        description = "Golden egg lucky draw REST API documentation"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_draw_and_admin_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/draw"));
        assert!(doc.paths.paths.contains_key("/api/admin/sounds/{id}/activate"));
        assert!(
            doc.components
                .as_ref()
                .is_some_and(|c| c.security_schemes.contains_key("bearer_auth"))
        );
    }
}
