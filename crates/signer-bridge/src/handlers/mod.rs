//! Identity extractors for supported credential formats

pub mod jwt;
pub mod mock;

pub use jwt::{JwtExtractor, JwtExtractorConfig};
pub use mock::MockExtractor;
