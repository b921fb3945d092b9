//! Field rules shared by request bodies.

use validator::ValidationError;

use super::password::is_blank;

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        let mut error = ValidationError::new("blank");
        error.message = Some("cannot be blank".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Capitals").is_ok());
        assert!(not_blank(" a ").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank(" \t\n").is_err());
    }
}
