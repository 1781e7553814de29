//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of `client.name` (VARCHAR(40)).
pub const NAME_MAX_LEN: u64 = 40;

/// Maximum length of `client.surname` (VARCHAR(40)).
pub const SURNAME_MAX_LEN: u64 = 40;

/// Maximum length of `client.email` (VARCHAR(40)).
pub const EMAIL_MAX_LEN: u64 = 40;

/// Maximum length of `phone.number` (VARCHAR(15)).
pub const PHONE_NUMBER_MAX_LEN: u64 = 15;

/// PostgreSQL truncates identifiers longer than NAMEDATALEN - 1 bytes.
pub const DATABASE_NAME_MAX_LEN: usize = 63;

/// Validates that a phone number fits the `phone.number` column.
pub fn validate_phone_number(number: &str) -> Result<(), ValidationError> {
    if number.chars().count() as u64 > PHONE_NUMBER_MAX_LEN {
        let mut err = ValidationError::new("phone_length");
        err.message = Some("Phone number must be at most 15 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates every number in a phone list.
pub fn validate_phone_numbers(numbers: &[String]) -> Result<(), ValidationError> {
    numbers
        .iter()
        .try_for_each(|number| validate_phone_number(number))
}

/// Validates that a database name is a plain SQL identifier.
///
/// The name ends up inside a `CREATE DATABASE` statement where it cannot be
/// bound as a parameter, so only ASCII letters, digits and underscores are
/// accepted and the first character must not be a digit.
pub fn validate_database_name(name: &str) -> Result<(), ValidationError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);

    if !valid_start
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        || name.len() > DATABASE_NAME_MAX_LEN
    {
        let mut err = ValidationError::new("database_name");
        err.message = Some(
            "Database name must start with a letter or underscore and contain only \
             letters, digits and underscores (max 63 characters)"
                .into(),
        );
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Phone number tests
    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("0000000000").is_ok());
        assert!(validate_phone_number("+7 900 1234567").is_ok());
        assert!(validate_phone_number("123456789012345").is_ok());
    }

    #[test]
    fn test_validate_phone_number_empty() {
        assert!(validate_phone_number("").is_ok());
    }

    #[test]
    fn test_validate_phone_number_too_long() {
        let err = validate_phone_number("1234567890123456").unwrap_err();
        assert_eq!(err.code, "phone_length");
    }

    #[test]
    fn test_validate_phone_number_counts_chars_not_bytes() {
        // 15 two-byte characters still fit VARCHAR(15)
        assert!(validate_phone_number(&"ж".repeat(15)).is_ok());
    }

    #[test]
    fn test_validate_phone_numbers() {
        assert!(validate_phone_numbers(&[]).is_ok());
        assert!(validate_phone_numbers(&["111".to_string(), "222".to_string()]).is_ok());
        assert!(validate_phone_numbers(&["111".to_string(), String::new()]).is_ok());
        assert!(validate_phone_numbers(&["111".to_string(), "9".repeat(16)]).is_err());
    }

    // Database name tests
    #[test]
    fn test_validate_database_name() {
        assert!(validate_database_name("client_db").is_ok());
        assert!(validate_database_name("_scratch").is_ok());
        assert!(validate_database_name("Clients2").is_ok());
    }

    #[test]
    fn test_validate_database_name_rejects_non_identifiers() {
        assert!(validate_database_name("").is_err());
        assert!(validate_database_name("1clients").is_err());
        assert!(validate_database_name("client-db").is_err());
        assert!(validate_database_name("clients; DROP TABLE client").is_err());
        assert!(validate_database_name("\"quoted\"").is_err());
    }

    #[test]
    fn test_validate_database_name_length() {
        assert!(validate_database_name(&"a".repeat(63)).is_ok());
        assert!(validate_database_name(&"a".repeat(64)).is_err());
    }
}
