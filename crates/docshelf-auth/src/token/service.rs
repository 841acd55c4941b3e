//! Token service tying JWTs to the user table and the refresh blacklist.

use chrono::Utc;
use tracing::{debug, info, warn};

use docshelf_core::config::auth::AuthConfig;
use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;
use docshelf_database::repositories::{TokenBlacklistRepository, UserRepository};
use docshelf_entity::user::User;

use crate::INVALID_TOKEN;
use crate::jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};

/// Issues, validates, rotates, and revokes tokens.
#[derive(Debug, Clone)]
pub struct TokenService {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    users: UserRepository,
    blacklist: TokenBlacklistRepository,
}

impl TokenService {
    /// Creates a new token service.
    pub fn new(
        config: &AuthConfig,
        users: UserRepository,
        blacklist: TokenBlacklistRepository,
    ) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            users,
            blacklist,
        }
    }

    /// Issue a fresh access + refresh pair.
    pub fn issue(&self, user: &User) -> AppResult<TokenPair> {
        self.encoder.generate_token_pair(user)
    }

    /// Resolve an access token to the user it was issued to.
    ///
    /// The user is re-read on every call, so deleted accounts stop
    /// authenticating and role changes apply immediately.
    pub async fn authenticate(&self, access_token: &str) -> AppResult<User> {
        let claims = self.decoder.decode_access_token(access_token)?;
        self.users
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| {
                debug!(user_id = claims.user_id, "Token for unknown user");
                AppError::authentication(INVALID_TOKEN)
            })
    }

    /// Validate a refresh token, including the blacklist.
    pub async fn validate_refresh(&self, refresh_token: &str) -> AppResult<Claims> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        if self.blacklist.is_blacklisted(&claims.jti.to_string()).await? {
            return Err(AppError::authentication(INVALID_TOKEN));
        }
        Ok(claims)
    }

    /// Exchange a refresh token for a new pair, consuming the old one.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(User, TokenPair)> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .users
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_TOKEN))?;

        // The insert is the atomic test-and-set: only one caller wins.
        let consumed = self
            .blacklist
            .insert(&claims.jti.to_string(), user.id, claims.expires_at())
            .await?;
        if !consumed {
            warn!(user_id = user.id, jti = %claims.jti, "Refresh token reuse rejected");
            return Err(AppError::authentication(INVALID_TOKEN));
        }

        let pair = self.encoder.generate_token_pair(&user)?;
        info!(user_id = user.id, "Token pair rotated");
        Ok((user, pair))
    }

    /// Revoke a refresh token. Revoking twice is not an error.
    pub async fn blacklist(&self, refresh_token: &str) -> AppResult<()> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        self.blacklist
            .insert(&claims.jti.to_string(), claims.user_id, claims.expires_at())
            .await?;
        Ok(())
    }

    /// Delete blacklist rows for tokens that have expired anyway.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        let removed = self.blacklist.purge_expired(Utc::now()).await?;
        info!(removed, "Purged expired blacklisted tokens");
        Ok(removed)
    }
}
