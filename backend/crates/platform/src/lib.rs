//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cryptographic utilities (HMAC-SHA256, base64url, secure randomness)
//! - Environment variable helpers used by the configuration layer

pub mod crypto;
pub mod env;
pub mod password;
