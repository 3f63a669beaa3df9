use crate::error::AppError;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token lifetime from issuance to expiry.
const TOKEN_TTL_HOURS: i64 = 24;

/// Represents the claims encoded within an issued token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: i32,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Why a token failed verification.
///
/// The distinction matters to the middleware: an expired token gets a
/// different 401 message than a forged or mangled one. A token that is both
/// tampered with and expired reports as invalid, since its expiry claim
/// cannot be trusted.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Signature checks out but the expiry instant has passed.
    Expired,
    /// Bad signature, truncated encoding, or otherwise malformed token.
    Invalid,
}

/// Stateless issuer and verifier of signed bearer tokens.
///
/// Holds the HMAC-SHA256 keys derived from the server secret; owns no other
/// state. Constructed once from [`Config`](crate::config::Config) and cloned
/// into the app data and the auth middleware, so the secret is an explicit
/// dependency rather than something read from the environment per call.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a signed token for a given user ID, expiring in 24 hours.
    ///
    /// Deterministic modulo the clock; never fails for a well-formed user ID
    /// short of a serialization problem inside the JWT library.
    pub fn issue(&self, user_id: i32) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::hours(TOKEN_TTL_HOURS))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: user_id,
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Store(format!("failed to issue token: {}", e)))
    }

    /// Verifies a token string and decodes its claims.
    ///
    /// The signature compare happens in constant time inside the JWT
    /// library, so a mismatch leaks nothing about where it occurred. Expiry
    /// is checked with zero leeway: a token is dead the second its `exp`
    /// instant passes.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
