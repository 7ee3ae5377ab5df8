//! Authentication and authorization

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::AccountId;

/// JWT claims
///
/// `accounts` carries the account ids this caller is allowed to touch;
/// the access gate treats everything outside that list as nonexistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (guardian ID)
    pub sub: String,
    /// Account ids the caller may access
    pub accounts: Vec<i64>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `guardian_id` - Guardian identifier
/// * `accounts` - Account ids the token grants access to
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    guardian_id: &str,
    accounts: Vec<i64>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: guardian_id.to_string(),
        accounts,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
///
/// # Arguments
///
/// * `token` - The JWT token to validate
/// * `secret` - JWT secret key
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

/// The account access gate
///
/// Returns true iff the token authorizes this account. Callers translate
/// a refusal into a not-found response, so unauthorized probes cannot
/// distinguish accounts that exist from accounts that do not.
pub fn can_access_account(claims: &Claims, account_id: AccountId) -> bool {
    claims.accounts.contains(&account_id.value())
}
