use crate::models::*;
use crate::services::{DrawService, PrizeService, SettingService, SoundService};
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/api/prizes",
    tag = "draw",
    responses(
        (status = 200, description = "获取奖品列表成功", body = [PublicPrizeResponse])
    )
)]
/// 前台奖品列表（按权重倒序, 不含权重）
pub async fn get_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.list_public().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/prizes/pool",
    tag = "draw",
    responses(
        (status = 200, description = "获取奖品池状态成功", body = [PublicPrizeResponse])
    )
)]
/// 奖品池状态（含剩余库存）
pub async fn get_pool(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    get_prizes(service).await
}

#[utoipa::path(
    post,
    path = "/api/draw",
    tag = "draw",
    responses(
        (status = 200, description = "中奖或奖池已抽完 (success=false, code=POOL_EXHAUSTED)", body = DrawResponse),
        (status = 500, description = "存储错误")
    )
)]
/// 砸蛋抽奖:
/// 1. 读取有库存的奖品
/// 2. 按权重选择
/// 3. 扣减库存并写中奖记录
pub async fn draw(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.draw().await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(DrawResponse::from(outcome))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/config",
    tag = "draw",
    responses(
        (status = 200, description = "获取金蛋配置成功", body = EggConfigResponse)
    )
)]
pub async fn get_config(service: web::Data<SettingService>) -> Result<HttpResponse> {
    match service.egg_config().await {
        Ok(config) => Ok(HttpResponse::Ok().json(ApiResponse::success(config))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/sounds",
    tag = "draw",
    responses(
        (status = 200, description = "获取当前音效成功", body = ActiveSoundsResponse)
    )
)]
pub async fn get_sounds(service: web::Data<SoundService>) -> Result<HttpResponse> {
    match service.active().await {
        Ok(sounds) => Ok(HttpResponse::Ok().json(ApiResponse::success(sounds))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/prizes", web::get().to(get_prizes))
        .route("/prizes/pool", web::get().to(get_pool))
        .route("/draw", web::post().to(draw))
        .route("/config", web::get().to(get_config))
        .route("/sounds", web::get().to(get_sounds));
}
