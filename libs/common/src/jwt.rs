//! JWT service for session token generation and validation
//!
//! Session tokens are HS256 JWTs signed with a server-held secret. They carry
//! the admin user's public identity and a fixed expiry. Verification is purely
//! local: no database or cache round trip is needed to trust a token.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind, get_current_timestamp,
};
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};
use crate::identity::{Role, SessionIdentity};
use crate::settings;

/// Default token lifetime in seconds (24 hours)
pub const DEFAULT_TOKEN_EXPIRY: u64 = 86_400;

/// Shortest signing secret accepted, in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret used to sign and verify tokens
    pub secret: String,
    /// Token lifetime in seconds
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Signing secret, at least 32 bytes (required)
    /// - `JWT_TOKEN_EXPIRY`: Token lifetime in seconds (default: 86400)
    pub fn from_env() -> SessionResult<Self> {
        let config: JwtConfig = settings::env_builder("JWT")
            .set_default("token_expiry", DEFAULT_TOKEN_EXPIRY as i64)
            .and_then(|builder| builder.build())
            .and_then(|config| config.try_deserialize())
            .map_err(|e| SessionError::Configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> SessionResult<()> {
        if self.secret.len() < MIN_SECRET_LENGTH {
            return Err(SessionError::Configuration(format!(
                "JWT secret must be at least {} bytes",
                MIN_SECRET_LENGTH
            )));
        }
        if self.token_expiry == 0 {
            return Err(SessionError::Configuration(
                "JWT token expiry must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Admin user ID
    pub sub: String,
    /// Admin username
    pub username: String,
    /// Admin role
    pub role: Role,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: u64,
}

impl TokenService {
    /// Initialize a new token service
    pub fn new(config: JwtConfig) -> SessionResult<Self> {
        config.validate()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(TokenService {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            token_expiry: config.token_expiry,
        })
    }

    /// Issue a token for `identity`, valid from now
    pub fn issue(&self, identity: &SessionIdentity) -> SessionResult<String> {
        self.issue_at(identity, get_current_timestamp())
    }

    /// Issue a token as if it had been created at `issued_at` (Unix seconds)
    pub fn issue_at(&self, identity: &SessionIdentity, issued_at: u64) -> SessionResult<String> {
        let claims = Claims {
            sub: identity.id.to_string(),
            username: identity.username.clone(),
            role: identity.role,
            iat: issued_at,
            exp: issued_at + self.token_expiry,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(SessionError::Signing)
    }

    /// Validate a token and return the identity it carries
    pub fn verify(&self, token: &str) -> SessionResult<SessionIdentity> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Invalid(e),
            })?
            .claims;

        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| SessionError::MalformedClaims("subject is not a user id".to_string()))?;

        if claims.username.is_empty() {
            return Err(SessionError::MalformedClaims("empty username".to_string()));
        }

        Ok(SessionIdentity {
            id,
            username: claims.username,
            role: claims.role,
        })
    }

    /// Token lifetime in seconds
    pub fn token_expiry(&self) -> u64 {
        self.token_expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hs256";

    fn service() -> TokenService {
        TokenService::new(JwtConfig {
            secret: SECRET.to_string(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
        })
        .unwrap()
    }

    fn admin() -> SessionIdentity {
        SessionIdentity {
            id: 1,
            username: "admin".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_token_verifies_right_after_issue() {
        let tokens = service();
        let token = tokens.issue(&admin()).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), admin());
    }

    #[test]
    fn test_token_fails_after_expiry() {
        let tokens = service();
        let issued_at = get_current_timestamp() - DEFAULT_TOKEN_EXPIRY - 5;
        let token = tokens.issue_at(&admin(), issued_at).unwrap();
        assert!(matches!(tokens.verify(&token), Err(SessionError::Expired)));
    }

    #[test]
    fn test_token_valid_just_before_expiry() {
        let tokens = service();
        let issued_at = get_current_timestamp() - DEFAULT_TOKEN_EXPIRY + 60;
        let token = tokens.issue_at(&admin(), issued_at).unwrap();
        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn test_any_single_bit_flip_invalidates_token() {
        let tokens = service();
        let token = tokens.issue(&admin()).unwrap();

        for index in 0..token.len() {
            // Bit 7 is skipped so the mutated token stays ASCII.
            for bit in 0..7 {
                let mut bytes = token.clone().into_bytes();
                bytes[index] ^= 1 << bit;
                let mutated = String::from_utf8(bytes).unwrap();
                assert!(
                    tokens.verify(&mutated).is_err(),
                    "flip of bit {} at byte {} still verified",
                    bit,
                    index
                );
            }
        }
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = service().issue(&admin()).unwrap();
        let other = TokenService::new(JwtConfig {
            secret: "another-secret-that-is-also-long-enough".to_string(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
        })
        .unwrap();
        assert!(matches!(other.verify(&token), Err(SessionError::Invalid(_))));
    }

    #[test]
    fn test_missing_claims_fail() {
        #[derive(Serialize)]
        struct Partial {
            sub: String,
            exp: u64,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                sub: "1".to_string(),
                exp: get_current_timestamp() + 600,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn test_non_numeric_subject_fails() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            username: "admin".to_string(),
            role: Role::Admin,
            iat: get_current_timestamp(),
            exp: get_current_timestamp() + 600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(SessionError::MalformedClaims(_))
        ));
    }

    #[test]
    fn test_garbage_token_fails() {
        assert!(service().verify("not.a.token").is_err());
        assert!(service().verify("").is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = TokenService::new(JwtConfig {
            secret: "short".to_string(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
        });
        assert!(matches!(result, Err(SessionError::Configuration(_))));
    }

    #[test]
    #[serial]
    fn test_jwt_config_from_env() {
        unsafe {
            std::env::set_var("JWT_SECRET", SECRET);
            std::env::remove_var("JWT_TOKEN_EXPIRY");
        }

        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.secret, SECRET);
        assert_eq!(config.token_expiry, DEFAULT_TOKEN_EXPIRY);

        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_jwt_config_requires_secret() {
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
        assert!(JwtConfig::from_env().is_err());
    }
}
