//! Domain entities

pub mod otp;
pub mod token;
pub mod user;

pub use otp::{OtpPurpose, OtpRecord};
pub use token::{AccessToken, Claims, TokenPair, TokenType};
pub use user::User;
