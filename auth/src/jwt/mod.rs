pub mod claims;
pub mod errors;
pub mod issuer;
pub mod key;
pub mod verifier;

pub use claims::Claims;
pub use errors::ConfigurationError;
pub use errors::TokenError;
pub use issuer::TokenIssuer;
pub use issuer::DEFAULT_TOKEN_TTL_HOURS;
pub use key::SigningKey;
pub use verifier::TokenVerifier;
