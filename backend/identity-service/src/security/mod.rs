/// Security module for identity-service
///
/// - Password hashing (Argon2id)
pub mod password;

pub use password::{hash_password, verify_password};
