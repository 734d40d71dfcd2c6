use crate::error::{AppError, AppResult};
use crate::models::{AdminLoginRequest, AdminLoginResponse, ChangePasswordRequest};
use crate::services::{ADMIN_PASSWORD_HASH_KEY, SettingService};
use crate::utils::{JwtService, hash_password, validate_password, verify_password};

/// 管理员认证: 密码以 bcrypt 哈希保存在 settings 表
#[derive(Clone)]
pub struct AuthService {
    settings: SettingService,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(settings: SettingService, jwt_service: JwtService) -> Self {
        Self {
            settings,
            jwt_service,
        }
    }

    /// 启动时调用: 数据库中还没有管理员密码时写入初始密码的哈希
    pub async fn ensure_admin_password(&self, initial_password: &str) -> AppResult<()> {
        if self.settings.get(ADMIN_PASSWORD_HASH_KEY).await?.is_some() {
            return Ok(());
        }
        if initial_password.is_empty() {
            return Err(AppError::ConfigError(
                "admin.initial_password must not be empty".into(),
            ));
        }

        let hashed = hash_blocking(initial_password.to_string()).await?;
        self.settings.set(ADMIN_PASSWORD_HASH_KEY, &hashed).await?;
        log::info!("Admin password initialised from configuration");
        Ok(())
    }

    pub async fn login(&self, request: AdminLoginRequest) -> AppResult<AdminLoginResponse> {
        self.check_password(&request.password).await?;

        let access_token = self.jwt_service.generate_admin_token()?;
        Ok(AdminLoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_expires_in(),
        })
    }

    pub async fn change_password(&self, request: ChangePasswordRequest) -> AppResult<()> {
        self.check_password(&request.old_password).await?;
        validate_password(&request.new_password)?;

        let hashed = hash_blocking(request.new_password).await?;
        self.settings.set(ADMIN_PASSWORD_HASH_KEY, &hashed).await?;
        log::info!("Admin password changed");
        Ok(())
    }

    async fn check_password(&self, password: &str) -> AppResult<()> {
        let stored = self
            .settings
            .get(ADMIN_PASSWORD_HASH_KEY)
            .await?
            .ok_or_else(|| AppError::ConfigError("Admin password is not initialised".into()))?;

        let password = password.to_string();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|e| AppError::InternalError(format!("Password check task failed: {e}")))??;

        if !matches {
            return Err(AppError::AuthError("Wrong password".to_string()));
        }
        Ok(())
    }
}

// bcrypt 计算较慢, 放到阻塞线程池
async fn hash_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hash task failed: {e}")))?
}
