use crate::error::{AppError, Result};

/// Validates an email address.
///
/// # Arguments
///
/// * `email` - The email address to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the address is well-formed.
pub fn validate_email(email: &str) -> Result<()> {
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !well_formed || email.len() > 255 {
        return Err(AppError::Validation("Email isn't correct".to_string()));
    }

    Ok(())
}

/// Validates a password for registration.
///
/// # Arguments
///
/// * `password` - The password to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the password is acceptable.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 6 {
        return Err(AppError::Validation(
            "Min length of password is 6".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be at most 128 characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_plain_address() {
        assert!(validate_email("a@x.com").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in ["", "ax.com", "@x.com", "a@", "a@xcom", "a b@x.com", "a@.com"] {
            assert!(validate_email(email).is_err(), "accepted: {email:?}");
        }
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn rejects_oversized_passwords() {
        assert!(validate_password(&"x".repeat(129)).is_err());
    }
}
