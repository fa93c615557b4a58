//! Credential checking and login sessions.

mod credentials;
mod session;

#[cfg(test)]
pub use credentials::MockCredentialVerifier;
pub use credentials::{constant_time_eq, CredentialVerifier, SaltedSha256Verifier};
pub use session::{Session, SessionService};
