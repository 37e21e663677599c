//! Authentication infrastructure: password hashing and session tokens

mod password;
mod token;

pub use password::{Argon2Hasher, PasswordHasher};
pub use token::{SessionClaims, TokenCodec, TokenConfig};
