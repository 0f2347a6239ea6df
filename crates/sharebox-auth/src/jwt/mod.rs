//! JWT encoding and decoding.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, DownloadClaims, DOWNLOAD_PURPOSE};
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
