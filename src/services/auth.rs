use crate::error::{AppError, Result};
use crate::models::user::User;
use crate::repositories::user as user_repo;
use deadpool_postgres::Pool;
use uuid::Uuid;
use zeroize::Zeroize;

/// The bcrypt cost factor. Raising it only affects newly created
/// credentials; the cost and salt travel inside each stored hash.
const BCRYPT_COST: u32 = 12;

/// Hashes a password with bcrypt.
///
/// A fresh random salt is drawn on every call, so hashing the same
/// plaintext twice yields two different credentials.
///
/// # Arguments
///
/// * `password` - The password to hash.
///
/// # Returns
///
/// A `Result` containing the hashed password.
fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let password_hash = bcrypt::hash(&password_bytes, BCRYPT_COST)
        .map_err(|e| AppError::Hashing(format!("bcrypt hash error: {}", e)))?;

    password_bytes.zeroize();
    tracing::debug!("Password hashed successfully with bcrypt");
    Ok(password_hash)
}

/// Verifies a password against a stored hash.
///
/// Re-derives the hash with the salt and cost embedded in `hash`; the
/// comparison is the bcrypt primitive's constant-time routine.
///
/// # Arguments
///
/// * `password` - The password to verify.
/// * `hash` - The hash to verify against.
///
/// # Returns
///
/// A `Result` containing `true` if the password is valid, `false` otherwise.
fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let mut password_bytes = password.as_bytes().to_vec();

    let result = bcrypt::verify(&password_bytes, hash)
        .map_err(|e| AppError::Hashing(format!("bcrypt verify error: {}", e)))?;

    password_bytes.zeroize();
    tracing::debug!("Password verification completed");
    Ok(result)
}

/// Creates a new user.
///
/// The pre-insert lookup produces the friendly duplicate rejection; the
/// database unique constraint catches the concurrent case.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `first_name` - The user's first name.
/// * `last_name` - The user's last name.
/// * `email` - The user's email address.
/// * `password` - The user's password.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub async fn create_user(
    db: &Pool,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
) -> Result<User> {
    tracing::debug!("🔐 Creating user: {}", email);

    if user_repo::find_by_email(db, &email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let hashed_password = hash_password(&password)?;

    let user = user_repo::insert(
        db,
        Uuid::new_v4(),
        &first_name,
        &last_name,
        &email,
        &hashed_password,
    )
    .await?;

    tracing::info!("✅ User created with ID: {}", user.id);
    Ok(user)
}

/// Authenticates a user.
///
/// The failure messages distinguish an unknown account from a wrong
/// password; both surface as 400 per the legacy contract.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `email` - The user's email address.
/// * `password` - The user's password.
///
/// # Returns
///
/// A `Result` containing the authenticated `User`.
pub async fn authenticate_user(db: &Pool, email: String, password: String) -> Result<User> {
    tracing::debug!("🔐 Authenticating user: {}", email);

    let user = user_repo::find_by_email(db, &email)
        .await?
        .ok_or_else(|| AppError::Authentication("User not found".to_string()))?;

    if !verify_password(&password, &user.password)? {
        return Err(AppError::Authentication(
            "Enter correct password".to_string(),
        ));
    }

    tracing::info!("✅ User authenticated: {}", user.id);

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_the_hashed_password() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_a_different_password() {
        let hash = hash_password("secret1").unwrap();
        assert!(!verify_password("wrong12", &hash).unwrap());
    }

    #[test]
    fn hashing_twice_salts_differently() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("secret1", &first).unwrap());
        assert!(verify_password("secret1", &second).unwrap());
    }

    #[test]
    fn cost_and_salt_travel_with_the_hash() {
        let hash = hash_password("secret1").unwrap();
        assert!(hash.starts_with("$2"), "unexpected credential format: {hash}");
        assert!(hash.contains("$12$"), "cost factor missing from: {hash}");
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify_password("secret1", "not-a-bcrypt-hash").is_err());
    }
}
