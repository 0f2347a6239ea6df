//! # sharebox-auth
//!
//! JWT issuance and validation, plus the OAuth2-style SSO login flow
//! against the corporate identity provider.

pub mod jwt;
pub mod sso;

pub use jwt::{Claims, DownloadClaims, JwtDecoder, JwtEncoder};
pub use sso::{SsoClient, SsoUserInfo};
