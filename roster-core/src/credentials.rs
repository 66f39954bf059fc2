//! Password hashing and verification
//!
//! Passwords are hashed with Argon2id into PHC strings. The work factor is
//! configurable so deployments can trade login latency for brute-force
//! resistance without touching call sites.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{DirectoryError, Result};

/// Tunable Argon2id cost parameters.
#[derive(Debug, Clone, Copy)]
pub struct WorkFactor {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of iterations
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for WorkFactor {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Hashes and verifies passwords at a configured work factor.
///
/// Holds no state beyond the Argon2 instance and a pre-computed dummy hash
/// used to equalize the cost of failed lookups during authentication.
#[derive(Clone)]
pub struct CredentialManager {
    argon2: Argon2<'static>,
    dummy_hash: String,
}

impl std::fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialManager").finish_non_exhaustive()
    }
}

impl CredentialManager {
    pub fn new(work_factor: WorkFactor) -> Result<Self> {
        let params = Params::new(
            work_factor.memory_kib,
            work_factor.iterations,
            work_factor.parallelism,
            None,
        )
        .map_err(|e| DirectoryError::InvalidInput(format!("Invalid work factor: {e}")))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        // Hashed once at construction so authenticate can verify against it
        // on the missing-user path.
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2
            .hash_password(b"roster-dummy-credential", &salt)
            .map_err(|e| DirectoryError::Store(format!("Failed to prepare dummy hash: {e}")))?
            .to_string();

        Ok(Self { argon2, dummy_hash })
    }

    /// Hash a plaintext password into a PHC string.
    ///
    /// Empty passwords are rejected before any hashing work is done.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        if plaintext.is_empty() {
            return Err(DirectoryError::InvalidInput(
                "Password cannot be empty".to_string(),
            ));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| DirectoryError::Store(format!("Failed to hash password: {e}")))?
            .to_string();

        Ok(hash)
    }

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// Returns false on any mismatch, including an unparseable hash; wrong
    /// passwords are not an error condition.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Hash of a fixed throwaway password, for cost-equalized verification
    /// when no user record was found.
    pub fn dummy_hash(&self) -> &str {
        &self.dummy_hash
    }
}
