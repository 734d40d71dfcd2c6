use actix_cors::Cors;

/// 前台页面与后台页面可能部署在不同域名下; 未配置白名单时允许任意来源
pub fn create_cors(allowed_origins: &[String]) -> Cors {
    let origins: Vec<String> = allowed_origins
        .iter()
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect();

    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            if origins.is_empty() {
                return true;
            }
            origin
                .to_str()
                .map(|o| origins.iter().any(|allowed| allowed == o))
                .unwrap_or(false)
        })
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
