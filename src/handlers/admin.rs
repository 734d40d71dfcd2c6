use crate::models::*;
use crate::services::{AuthService, PrizeService, RecordService, SettingService, SoundService};
use actix_web::{HttpResponse, ResponseError, Result, web};

// ==================== 登录 / 密码 ====================

#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "登录成功", body = AdminLoginResponse),
        (status = 401, description = "密码错误")
    )
)]
pub async fn login(
    service: web::Data<AuthService>,
    request: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse> {
    match service.login(request.into_inner()).await {
        Ok(token) => Ok(HttpResponse::Ok().json(ApiResponse::success(token))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/admin/password",
    tag = "admin",
    request_body = ChangePasswordRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "修改成功"),
        (status = 400, description = "新密码不符合要求"),
        (status = 401, description = "旧密码错误或未授权")
    )
)]
pub async fn change_password(
    service: web::Data<AuthService>,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse> {
    match service.change_password(request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            (),
            "Password updated".to_string(),
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

// ==================== 奖品 ====================

#[utoipa::path(
    get,
    path = "/api/admin/prizes",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "奖品列表", body = [PrizeResponse]))
)]
pub async fn list_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.list_all().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/admin/prizes",
    tag = "admin",
    request_body = PrizeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "创建成功", body = PrizeResponse),
        (status = 400, description = "参数错误")
    )
)]
pub async fn create_prize(
    service: web::Data<PrizeService>,
    request: web::Json<PrizeRequest>,
) -> Result<HttpResponse> {
    match service.create(request.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(ApiResponse::success(prize))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/admin/prizes/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "奖品ID")),
    request_body = PrizeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "修改成功", body = PrizeResponse),
        (status = 404, description = "奖品不存在")
    )
)]
pub async fn update_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
    request: web::Json<PrizeRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), request.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(ApiResponse::success(prize))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/admin/prizes/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "奖品ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "删除成功"),
        (status = 404, description = "奖品不存在")
    )
)]
pub async fn delete_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(CreatedResponse { id }))),
        Err(e) => Ok(e.error_response()),
    }
}

// ==================== 配置 ====================

#[utoipa::path(
    get,
    path = "/api/admin/config",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "金蛋配置", body = EggConfigResponse))
)]
pub async fn get_config(service: web::Data<SettingService>) -> Result<HttpResponse> {
    match service.egg_config().await {
        Ok(config) => Ok(HttpResponse::Ok().json(ApiResponse::success(config))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/admin/config",
    tag = "admin",
    request_body = UpdateEggConfigRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "更新成功", body = EggConfigResponse),
        (status = 400, description = "参数错误")
    )
)]
pub async fn update_config(
    service: web::Data<SettingService>,
    request: web::Json<UpdateEggConfigRequest>,
) -> Result<HttpResponse> {
    match service.update_egg_config(request.into_inner()).await {
        Ok(config) => Ok(HttpResponse::Ok().json(ApiResponse::success(config))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/admin/upload/egg-image",
    tag = "admin",
    request_body = ImageUrlRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "保存成功", body = ImageUrlResponse),
        (status = 400, description = "缺少图片地址")
    )
)]
pub async fn set_egg_image(
    service: web::Data<SettingService>,
    request: web::Json<ImageUrlRequest>,
) -> Result<HttpResponse> {
    set_image(service, EggImageKind::Egg, request.into_inner()).await
}

#[utoipa::path(
    post,
    path = "/api/admin/upload/smashed-image",
    tag = "admin",
    request_body = ImageUrlRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "保存成功", body = ImageUrlResponse),
        (status = 400, description = "缺少图片地址")
    )
)]
pub async fn set_smashed_image(
    service: web::Data<SettingService>,
    request: web::Json<ImageUrlRequest>,
) -> Result<HttpResponse> {
    set_image(service, EggImageKind::Smashed, request.into_inner()).await
}

async fn set_image(
    service: web::Data<SettingService>,
    kind: EggImageKind,
    request: ImageUrlRequest,
) -> Result<HttpResponse> {
    match service.set_image_url(kind, request.url).await {
        Ok(url) => Ok(HttpResponse::Ok().json(ApiResponse::success(ImageUrlResponse { url }))),
        Err(e) => Ok(e.error_response()),
    }
}

// ==================== 记录 / 统计 ====================

#[utoipa::path(
    get,
    path = "/api/admin/records",
    tag = "admin",
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20, 最大100)")
    ),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "中奖记录（倒序）", body = PaginatedResponse<DrawRecordResponse>))
)]
pub async fn list_records(
    service: web::Data<RecordService>,
    query: web::Query<RecordQuery>,
) -> Result<HttpResponse> {
    match service.list(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "统计信息", body = StatsResponse))
)]
pub async fn get_stats(service: web::Data<RecordService>) -> Result<HttpResponse> {
    match service.stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats))),
        Err(e) => Ok(e.error_response()),
    }
}

// ==================== 音效 ====================

#[utoipa::path(
    get,
    path = "/api/admin/sounds",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "全部音效", body = [SoundResponse]))
)]
pub async fn list_sounds(service: web::Data<SoundService>) -> Result<HttpResponse> {
    match service.list().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/admin/sounds",
    tag = "admin",
    request_body = CreateSoundRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "创建成功", body = SoundResponse),
        (status = 400, description = "参数错误")
    )
)]
pub async fn create_sound(
    service: web::Data<SoundService>,
    request: web::Json<CreateSoundRequest>,
) -> Result<HttpResponse> {
    match service.create(request.into_inner()).await {
        Ok(sound) => Ok(HttpResponse::Ok().json(ApiResponse::success(sound))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/admin/sounds/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "音效ID")),
    request_body = UpdateSoundRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "修改成功", body = SoundResponse),
        (status = 404, description = "音效不存在")
    )
)]
pub async fn update_sound(
    service: web::Data<SoundService>,
    path: web::Path<i64>,
    request: web::Json<UpdateSoundRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), request.into_inner()).await {
        Ok(sound) => Ok(HttpResponse::Ok().json(ApiResponse::success(sound))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/admin/sounds/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "音效ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "删除成功"),
        (status = 404, description = "音效不存在")
    )
)]
pub async fn delete_sound(
    service: web::Data<SoundService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(CreatedResponse { id }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/api/admin/sounds/{id}/activate",
    tag = "admin",
    params(("id" = i64, Path, description = "音效ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "激活成功, 同类型其它音效被停用", body = SoundResponse),
        (status = 404, description = "音效不存在")
    )
)]
pub async fn activate_sound(
    service: web::Data<SoundService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.activate(path.into_inner()).await {
        Ok(sound) => Ok(HttpResponse::Ok().json(ApiResponse::success(sound))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/login", web::post().to(login))
            .route("/password", web::put().to(change_password))
            .route("/prizes", web::get().to(list_prizes))
            .route("/prizes", web::post().to(create_prize))
            .route("/prizes/{id}", web::put().to(update_prize))
            .route("/prizes/{id}", web::delete().to(delete_prize))
            .route("/config", web::get().to(get_config))
            .route("/config", web::put().to(update_config))
            .route("/upload/egg-image", web::post().to(set_egg_image))
            .route("/upload/smashed-image", web::post().to(set_smashed_image))
            .route("/records", web::get().to(list_records))
            .route("/stats", web::get().to(get_stats))
            .route("/sounds", web::get().to(list_sounds))
            .route("/sounds", web::post().to(create_sound))
            .route("/sounds/{id}", web::put().to(update_sound))
            .route("/sounds/{id}", web::delete().to(delete_sound))
            .route("/sounds/{id}/activate", web::put().to(activate_sound)),
    );
}
