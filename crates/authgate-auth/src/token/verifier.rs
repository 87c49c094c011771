//! Credential validation with algorithm pinning.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};

use authgate_core::config::auth::AuthConfig;
use authgate_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// Algorithms in the symmetric HMAC family. Credentials carrying any other
/// algorithm tag are rejected before signature checking.
const HMAC_FAMILY: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Validates credential strings against the signing secret.
///
/// Side-effect free; a pure function of (secret, credential, clock). Whether
/// a credential is still the live one for its principal is decided by the
/// session authority, not here.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_FAMILY.to_vec();
        validation.validate_exp = true;
        validation.leeway = config.clock_skew_leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a credential string, returning its claims.
    ///
    /// Checks, in order:
    /// 1. The header parses (`MalformedCredential` otherwise)
    /// 2. The algorithm tag is in the HMAC family (`UnexpectedAlgorithm`)
    /// 3. The signature verifies (`SignatureMismatch`)
    /// 4. The expiry timestamp has not passed (`Expired`)
    pub fn verify(&self, credential: &str) -> Result<Claims, AppError> {
        let header = decode_header(credential).map_err(|e| {
            AppError::with_source(
                ErrorKind::MalformedCredential,
                "Credential header could not be parsed",
                e,
            )
        })?;

        if !HMAC_FAMILY.contains(&header.alg) {
            return Err(AppError::unexpected_algorithm(format!(
                "Unexpected signing algorithm: {:?}",
                header.alg
            )));
        }

        let data = decode::<Claims>(credential, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::expired("Credential has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::signature_mismatch("Credential signature does not verify")
                }
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                    AppError::unexpected_algorithm("Credential algorithm is not accepted")
                }
                _ => AppError::with_source(
                    ErrorKind::MalformedCredential,
                    format!("Credential could not be parsed: {e}"),
                    e,
                ),
            },
        )?;

        Ok(data.claims)
    }
}
