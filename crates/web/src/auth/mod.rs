pub mod google;
pub mod jwt;
pub mod password;

pub use google::GoogleVerifier;
pub use jwt::JwtKeys;
