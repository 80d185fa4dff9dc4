use anyhow::Result;
use chrono::{Duration, Utc};
use common::AdminRole;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Audience of tokens issued to back-office admins.
pub const ADMIN_AUDIENCE: &str = "techshethra:admin";
/// Audience of tokens issued to portal students.
pub const STUDENT_AUDIENCE: &str = "techshethra:student";

/// Claims of a token kind. The audience is checked on every verification so
/// one principal's token is never accepted for the other.
pub trait TokenClaims: Serialize + DeserializeOwned {
    const AUDIENCE: &'static str;
}

/// Claims carried by an admin token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String, // Email
    pub uid: i32,    // Admin ID
    pub role: AdminRole,
    pub aud: String,
    pub exp: usize, // Expiration timestamp
}

impl AdminClaims {
    pub fn new(uid: i32, email: &str, role: AdminRole, ttl_hours: i64) -> Self {
        Self {
            sub: email.to_owned(),
            uid,
            role,
            aud: ADMIN_AUDIENCE.to_owned(),
            exp: expiry(ttl_hours),
        }
    }
}

impl TokenClaims for AdminClaims {
    const AUDIENCE: &'static str = ADMIN_AUDIENCE;
}

/// Claims carried by a student token.
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentClaims {
    pub sub: String, // Email
    pub uid: i32,    // Student ID
    pub aud: String,
    pub exp: usize,
}

impl StudentClaims {
    pub fn new(uid: i32, email: &str, ttl_hours: i64) -> Self {
        Self {
            sub: email.to_owned(),
            uid,
            aud: STUDENT_AUDIENCE.to_owned(),
            exp: expiry(ttl_hours),
        }
    }
}

impl TokenClaims for StudentClaims {
    const AUDIENCE: &'static str = STUDENT_AUDIENCE;
}

fn expiry(ttl_hours: i64) -> usize {
    let ttl = Duration::try_hours(ttl_hours.max(1)).unwrap_or_else(|| Duration::days(7));
    Utc::now()
        .checked_add_signed(ttl)
        .unwrap_or_else(Utc::now)
        .timestamp() as usize
}

/// Sign a JWT for the given claims.
pub fn sign<C: TokenClaims>(claims: &C, secret: &str) -> Result<String> {
    let token = encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a JWT, requiring the audience of `C`.
pub fn verify<C: TokenClaims>(token: &str, secret: &str) -> Result<C> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[C::AUDIENCE]);
    validation.set_required_spec_claims(&["exp", "aud", "sub"]);

    let token_data = decode::<C>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
