pub mod password;
pub mod policy;
pub mod token;

pub use token::{Claims, TokenSigner};

/// The verified username behind a request. Resolved once by the auth
/// middleware and passed explicitly into every authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}
