use crate::error::{AppError, AppResult};
use bcrypt::{DEFAULT_COST, hash};

/// 验证密码强度
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < 8 || password.len() > 72 {
        // bcrypt 只使用前 72 字节
        return Err(AppError::ValidationError(
            "Password must be between 8 and 72 bytes".to_string(),
        ));
    }

    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_letter || !has_digit {
        return Err(AppError::ValidationError(
            "Password must contain letters and digits".to_string(),
        ));
    }

    Ok(())
}

pub fn hash_password(password: &str) -> AppResult<String> {
    Ok(hash(password, DEFAULT_COST)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password() {
        assert!(validate_password("petani2024").is_ok());
        assert!(validate_password("onlyletters").is_err());
        assert!(validate_password("12345678").is_err());
        assert!(validate_password("ab12").is_err());
        assert!(validate_password(&"a1".repeat(40)).is_err());
    }

    #[test]
    fn test_password_limit_counts_bytes() {
        // 50 个字符, 75 字节
        let err = validate_password(&"\u{e9}1".repeat(25)).unwrap_err();
        assert!(err.to_string().contains("72 bytes"));
        assert!(validate_password(&"\u{e9}1".repeat(24)).is_ok());
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hashed = hash_password("petani2024").unwrap();

        assert_ne!(hashed, "petani2024");
        assert!(bcrypt::verify("petani2024", &hashed).unwrap());
        assert!(!bcrypt::verify("petani2025", &hashed).unwrap());
    }
}
