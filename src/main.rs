use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use egg_draw_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration");

    // 整个进程共用一个连接池, 注入到各个服务
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.expires_in);

    let setting_service = SettingService::new(pool.clone());
    let auth_service = AuthService::new(setting_service.clone(), jwt_service.clone());
    let draw_service = DrawService::new(pool.clone(), config.draw.max_weight_window);
    let prize_service = PrizeService::new(pool.clone());
    let record_service = RecordService::new(pool.clone());
    let sound_service = SoundService::new(pool.clone());

    auth_service
        .ensure_admin_password(&config.admin.initial_password)
        .await
        .expect("Failed to initialise admin password");

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .wrap(create_cors(&allowed_origins))
            .wrap(Logger::default())
            .app_data(web::Data::new(setting_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(draw_service.clone()))
            .app_data(web::Data::new(prize_service.clone()))
            .app_data(web::Data::new(record_service.clone()))
            .app_data(web::Data::new(sound_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api")
                    .configure(handlers::draw_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
