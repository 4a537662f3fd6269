pub mod datetime;
pub mod hash;
pub mod jwt;
pub mod otp;
