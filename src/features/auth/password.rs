//! Salted password hashing for the `users.pass` column.

use uuid::Uuid;

/// Hash `password` with a fresh random salt, returning the Argon2 encoded string
pub fn hash_password(password: &str) -> Result<String, argon2::Error> {
    let salt = Uuid::new_v4();
    argon2::hash_encoded(
        password.as_bytes(),
        salt.as_bytes(),
        &argon2::Config::default(),
    )
}

/// Check `password` against an encoded hash produced by [`hash_password`]
pub fn verify_password(encoded: &str, password: &str) -> Result<bool, argon2::Error> {
    argon2::verify_encoded(encoded, password.as_bytes())
}
