//! RS256 key management for JWT signing and verification

use std::fs;
use std::path::{Path, PathBuf};

use insapp_shared::config::JwtConfig;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::KeyError;

/// Manager for the RS256 key pair used in JWT operations
///
/// Built once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct Rs256KeyManager {
    /// Private key for signing JWTs
    encoding_key: EncodingKey,
    /// Public key for verifying JWTs
    decoding_key: DecodingKey,
    /// Path to private key file
    private_key_path: PathBuf,
    /// Path to public key file
    public_key_path: PathBuf,
}

impl std::fmt::Debug for Rs256KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256KeyManager")
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .finish()
    }
}

/// Payload signed and verified once at load time to prove the keys match
#[derive(Serialize, Deserialize)]
struct KeyCheck {
    check: String,
}

impl Rs256KeyManager {
    /// Creates a new RS256 key manager from key file paths
    ///
    /// # Arguments
    ///
    /// * `private_key_path` - Path to the PEM-encoded RSA private key file
    /// * `public_key_path` - Path to the PEM-encoded RSA public key file
    ///
    /// # Returns
    ///
    /// * `Ok(Rs256KeyManager)` - Key manager initialized successfully
    /// * `Err(KeyError)` - A file is missing, is not an RSA PEM key, or the
    ///   two keys do not belong together
    ///
    /// # Example
    ///
    /// ```no_run
    /// use insapp_core::services::token::Rs256KeyManager;
    ///
    /// let key_manager = Rs256KeyManager::new(
    ///     "keys/jwt_private_key.pem",
    ///     "keys/jwt_public_key.pem",
    /// ).expect("Failed to load keys");
    /// ```
    pub fn new<P: AsRef<Path>>(private_key_path: P, public_key_path: P) -> Result<Self, KeyError> {
        let private_key_path = private_key_path.as_ref().to_path_buf();
        let public_key_path = public_key_path.as_ref().to_path_buf();

        let private_key_pem = fs::read(&private_key_path).map_err(|source| KeyError::Read {
            path: private_key_path.clone(),
            source,
        })?;
        let public_key_pem = fs::read(&public_key_path).map_err(|source| KeyError::Read {
            path: public_key_path.clone(),
            source,
        })?;

        let manager = Self::from_pem_bytes(
            &private_key_pem,
            &public_key_pem,
            private_key_path,
            public_key_path,
        )?;

        info!(
            private_key = %manager.private_key_path.display(),
            public_key = %manager.public_key_path.display(),
            "Loaded RS256 signing keys"
        );

        Ok(manager)
    }

    /// Creates a key manager from the configured key paths
    pub fn from_config(config: &JwtConfig) -> Result<Self, KeyError> {
        Self::new(&config.private_key_path, &config.public_key_path)
    }

    /// Creates a key manager from PEM strings (useful for testing or embedded keys)
    pub fn from_pem_strings(private_key_pem: &str, public_key_pem: &str) -> Result<Self, KeyError> {
        Self::from_pem_bytes(
            private_key_pem.as_bytes(),
            public_key_pem.as_bytes(),
            PathBuf::from("memory"),
            PathBuf::from("memory"),
        )
    }

    fn from_pem_bytes(
        private_key_pem: &[u8],
        public_key_pem: &[u8],
        private_key_path: PathBuf,
        public_key_path: PathBuf,
    ) -> Result<Self, KeyError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem).map_err(|source| {
            KeyError::InvalidPrivateKey {
                path: private_key_path.clone(),
                source,
            }
        })?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem).map_err(|source| {
            KeyError::InvalidPublicKey {
                path: public_key_path.clone(),
                source,
            }
        })?;

        let manager = Self {
            encoding_key,
            decoding_key,
            private_key_path,
            public_key_path,
        };
        manager.verify_pair()?;

        Ok(manager)
    }

    /// Signs a check claim with the private key and checks it against the public key
    fn verify_pair(&self) -> Result<(), KeyError> {
        let check = KeyCheck {
            check: String::from("insapp-key-check"),
        };

        let signed = encode(&Header::new(Algorithm::RS256), &check, &self.encoding_key)
            .map_err(|source| KeyError::InvalidPrivateKey {
                path: self.private_key_path.clone(),
                source,
            })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<KeyCheck>(&signed, &self.decoding_key, &validation)
            .map(|_| ())
            .map_err(|_| KeyError::Mismatch)
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Returns the paths to the key files
    pub fn key_paths(&self) -> (&Path, &Path) {
        (&self.private_key_path, &self.public_key_path)
    }
}
