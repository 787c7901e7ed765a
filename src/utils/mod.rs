pub mod error;
pub mod hashing;
pub mod response;
