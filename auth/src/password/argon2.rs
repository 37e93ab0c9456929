use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Cost parameters for password hashing.
///
/// Defaults to the Argon2id parameters recommended by the `argon2` crate
/// (19 MiB of memory, 2 iterations, 1 lane).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    params: Params,
}

impl PasswordPolicy {
    /// Build a policy from explicit Argon2 cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB (at least 8 per lane)
    /// * `iterations` - Number of passes over memory (at least 1)
    /// * `parallelism` - Number of lanes (at least 1)
    ///
    /// # Errors
    /// * `InvalidPolicy` - Parameters are outside the ranges Argon2 accepts
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, PasswordError> {
        Params::new(memory_kib, iterations, parallelism, None)
            .map(|params| Self { params })
            .map_err(|e| PasswordError::InvalidPolicy(e.to_string()))
    }

    pub fn memory_kib(&self) -> u32 {
        self.params.m_cost()
    }

    pub fn iterations(&self) -> u32 {
        self.params.t_cost()
    }

    pub fn parallelism(&self) -> u32 {
        self.params.p_cost()
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
/// Every call is CPU-bound and blocking; async callers should run it on a
/// blocking worker.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    policy: PasswordPolicy,
}

impl PasswordHasher {
    /// Create a new password hasher with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a password hasher with an explicit cost policy.
    pub fn with_policy(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is drawn from the OS RNG on every call, so hashing
    /// the same password twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The cost parameters embedded in the stored hash are used, so hashes
    /// produced under an older policy keep verifying. The final digest
    /// comparison is constant-time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            self.policy.params.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_policy(PasswordPolicy::new(1024, 1, 1).expect("valid policy"))
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = cheap_hasher();

        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first).unwrap());
        assert!(hasher.verify("secret1", &second).unwrap());
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("plaintext_password").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("plaintext_password"));
    }

    #[test]
    fn test_hash_embeds_policy() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("secret1").unwrap();

        assert!(hash.contains("m=1024,t=1,p=1"));
    }

    #[test]
    fn test_verify_uses_parameters_from_stored_hash() {
        let old = cheap_hasher();
        let hash = old.hash("secret1").unwrap();

        let stronger =
            PasswordHasher::with_policy(PasswordPolicy::new(2048, 2, 1).expect("valid policy"));
        assert!(stronger.verify("secret1", &hash).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = cheap_hasher();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }

    #[test]
    fn test_invalid_policy() {
        let result = PasswordPolicy::new(1024, 0, 1);
        assert!(matches!(result, Err(PasswordError::InvalidPolicy(_))));
    }

    #[test]
    fn test_default_policy() {
        let policy = PasswordPolicy::default();
        assert_eq!(policy.memory_kib(), 19 * 1024);
        assert_eq!(policy.iterations(), 2);
        assert_eq!(policy.parallelism(), 1);
    }
}
