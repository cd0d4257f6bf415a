//! Credential adapters: bcrypt password hashing and HS256 bearer tokens.

mod bcrypt_password_hasher;
mod jwt_tokens;

pub use bcrypt_password_hasher::BcryptPasswordHasher;
pub use jwt_tokens::{JwtTokenService, MIN_SECRET_LENGTH};
