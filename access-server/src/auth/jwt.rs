//! JWT 令牌服务
//!
//! 访问令牌与刷新令牌使用不同密钥签名，互相不可替代。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::models::TokenPair;
use thiserror::Error;

/// 生产环境密钥最小长度
pub const MIN_SECRET_LEN: usize = 32;

/// JWT 配置
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 访问令牌密钥
    pub access_secret: String,
    /// 刷新令牌密钥
    pub refresh_secret: String,
    /// 访问令牌有效期 (分钟)
    pub access_ttl_minutes: i64,
    /// 刷新令牌有效期 (天)
    pub refresh_ttl_days: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl JwtConfig {
    /// 从环境变量加载
    ///
    /// 开发环境下缺失的密钥会临时生成；其他环境缺失或过短即报错。
    pub fn from_env(is_development: bool) -> Result<Self, JwtError> {
        Ok(Self {
            access_secret: load_secret("JWT_SECRET", is_development)?,
            refresh_secret: load_secret("REFRESH_TOKEN_SECRET", is_development)?,
            access_ttl_minutes: std::env::var("JWT_ACCESS_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
            refresh_ttl_days: std::env::var("JWT_REFRESH_TTL_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "access-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "access-admin".to_string()),
        })
    }
}

impl Default for JwtConfig {
    /// 开发默认值：随机密钥，15 分钟 / 7 天
    fn default() -> Self {
        Self {
            access_secret: generate_dev_secret(),
            refresh_secret: generate_dev_secret(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
            issuer: "access-server".to_string(),
            audience: "access-admin".to_string(),
        }
    }
}

/// 令牌类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 管理员 ID (Subject)
    pub sub: String,
    /// 管理员邮箱
    pub email: String,
    /// 令牌类型
    pub token_type: TokenType,
    /// 唯一 ID，同一秒内签发的令牌也互不相同
    pub jti: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    ExpiredToken,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("wrong token type: expected {expected:?}")]
    WrongTokenType { expected: TokenType },

    #[error("token generation failed: {0}")]
    GenerationFailed(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

/// 生成开发用密钥 (32 字节随机数的十六进制)
pub fn generate_dev_secret() -> String {
    let rng = SystemRandom::new();
    let mut key = [0u8; 32];
    if rng.fill(&mut key).is_err() {
        // 随机源不可用时退化为基于 UUID 的密钥
        return format!(
            "{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        );
    }
    hex::encode(key)
}

/// 从环境变量安全地加载密钥
fn load_secret(var: &str, is_development: bool) -> Result<String, JwtError> {
    match std::env::var(var) {
        Ok(secret) if secret.len() >= MIN_SECRET_LEN => Ok(secret),
        Ok(_) if !is_development => Err(JwtError::ConfigError(format!(
            "{var} must be at least {MIN_SECRET_LEN} characters long"
        ))),
        Ok(secret) => {
            tracing::warn!("{} is shorter than {} characters", var, MIN_SECRET_LEN);
            Ok(secret)
        }
        Err(_) if is_development => {
            tracing::warn!("{} not set, generating a temporary development key", var);
            Ok(generate_dev_secret())
        }
        Err(_) => Err(JwtError::ConfigError(format!(
            "{var} environment variable must be set outside development"
        ))),
    }
}

/// JWT 令牌服务
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// 使用指定配置创建 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            config,
        }
    }

    fn claims(&self, admin_id: &str, email: &str, token_type: TokenType) -> Claims {
        let now = Utc::now();
        let lifetime = match token_type {
            TokenType::Access => Duration::minutes(self.config.access_ttl_minutes),
            TokenType::Refresh => Duration::days(self.config.refresh_ttl_days),
        };

        Claims {
            sub: admin_id.to_string(),
            email: email.to_string(),
            token_type,
            jti: uuid::Uuid::new_v4().to_string(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        }
    }

    /// 签发访问令牌
    pub fn generate_access_token(&self, admin_id: &str, email: &str) -> Result<String, JwtError> {
        let claims = self.claims(admin_id, email, TokenType::Access);
        encode(&Header::default(), &claims, &self.access_encoding)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 签发刷新令牌
    pub fn generate_refresh_token(&self, admin_id: &str, email: &str) -> Result<String, JwtError> {
        let claims = self.claims(admin_id, email, TokenType::Refresh);
        encode(&Header::default(), &claims, &self.refresh_encoding)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 签发新的令牌对
    pub fn generate_pair(&self, admin_id: &str, email: &str) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.generate_access_token(admin_id, email)?,
            refresh_token: self.generate_refresh_token(admin_id, email)?,
        })
    }

    /// 验证访问令牌
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate(token, &self.access_decoding, TokenType::Access)
    }

    /// 验证刷新令牌
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate(token, &self.refresh_decoding, TokenType::Refresh)
    }

    fn validate(
        &self,
        token: &str,
        key: &DecodingKey,
        expected: TokenType,
    ) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data =
            decode::<Claims>(token, key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            })?;

        if token_data.claims.token_type != expected {
            return Err(JwtError::WrongTokenType { expected });
        }

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl From<JwtError> for shared::error::AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => shared::error::AppError::token_expired(),
            JwtError::InvalidToken(msg) => shared::error::AppError::invalid_token(msg),
            JwtError::InvalidSignature => shared::error::AppError::invalid_token("Invalid token signature"),
            JwtError::WrongTokenType { .. } => shared::error::AppError::invalid_token("Wrong token type"),
            JwtError::GenerationFailed(msg) => {
                shared::error::AppError::internal(format!("Token generation failed: {msg}"))
            }
            JwtError::ConfigError(msg) => {
                shared::error::AppError::with_message(shared::error::ErrorCode::ConfigError, msg)
            }
        }
    }
}

/// 当前管理员上下文
///
/// 由认证中间件在令牌验证且管理员仍存在后注入请求扩展。
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    /// 管理员 ID
    pub id: String,
    /// 管理员邮箱
    pub email: String,
}

impl From<Claims> for CurrentAdmin {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}
