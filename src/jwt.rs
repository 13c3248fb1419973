use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::access::AccessError;
use crate::app::AppState;
use crate::authz::{Requester, Role};
use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: Arc<Vec<u8>>,
    pub exp_hours: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<Vec<u8>>, exp_hours: i64) -> Self {
        Self {
            secret: Arc::new(secret.into()),
            exp_hours,
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| AppError::configuration("JWT_SECRET not set"))?;
        let exp_hours = std::env::var("JWT_EXP_HOURS")
            .map(|val| val.parse::<i64>())
            .unwrap_or(Ok(24))
            .map_err(|_| AppError::configuration("JWT_EXP_HOURS must be a valid integer"))?;

        Ok(Self::new(secret.into_bytes(), exp_hours))
    }

    pub fn encode(&self, user_id: Uuid, role: Role) -> Result<String, AppError> {
        use chrono::{Duration, Utc};

        let now = Utc::now();
        let exp = now + Duration::hours(self.exp_hours);

        let claims = Claims {
            sub: user_id,
            role,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(&self.secret))
            .map_err(|err| AppError::token(err.to_string()))
    }

    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(&self.secret), &validation)
            .map(|data| data.claims)
            .map_err(|err| AppError::token(err.to_string()))
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

/// Validates a bearer token and yields the identity behind it.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Requester, AccessError>;
}

/// Checks the token signature, then reloads the requester's role from
/// `users` so role changes apply to tokens already handed out.
#[derive(Clone)]
pub struct UserSessionVerifier {
    jwt: Arc<JwtConfig>,
    pool: SqlitePool,
}

impl UserSessionVerifier {
    pub fn new(jwt: Arc<JwtConfig>, pool: SqlitePool) -> Self {
        Self { jwt, pool }
    }
}

#[async_trait]
impl SessionVerifier for UserSessionVerifier {
    async fn verify(&self, token: &str) -> Result<Requester, AccessError> {
        let claims = self.jwt.decode(token).map_err(|err| {
            tracing::debug!(error = %err, "session token rejected");
            AccessError::Unauthenticated
        })?;

        let stored: Option<String> = sqlx::query_scalar("SELECT role FROM users WHERE id = ?")
            .bind(claims.sub)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, user_id = %claims.sub, "session role lookup failed");
                AccessError::UpstreamFailure("data store failure".to_string())
            })?;

        let Some(stored) = stored else {
            tracing::debug!(user_id = %claims.sub, "session token for a deleted user");
            return Err(AccessError::Unauthenticated);
        };

        let role = stored.parse::<Role>().map_err(|err| {
            tracing::error!(error = %err, user_id = %claims.sub, "stored role is invalid");
            AccessError::UpstreamFailure("invalid stored role".to_string())
        })?;

        Ok(Requester::new(claims.sub, role))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| AppError::unauthorized("Authorization header missing"))?;

        let claims = state.jwt.decode(token)?;

        Ok(AuthUser { user_id: claims.sub })
    }
}

/// Raw bearer token, if any. Validation is left to the handler.
#[derive(Debug, Clone)]
pub struct BearerToken(pub Option<String>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(bearer_token(parts).map(String::from)))
    }
}
