use bcrypt::BcryptError;

#[cfg(not(test))]
pub const HASH_COST: u32 = 14;

// bcrypt's minimum cost under test.
#[cfg(test)]
pub const HASH_COST: u32 = 4;

/// Hash a plaintext password. Inputs longer than bcrypt's 72-byte limit are
/// rejected instead of silently truncated.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    bcrypt::non_truncating_hash(password, HASH_COST)
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(password, hashed)
}
