use validator::ValidationError;

pub fn validate_required(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("is_required");
        error.message = Some(std::borrow::Cow::from("This field is required"));
        Err(error)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_values() {
        assert!(validate_required(&"".to_string()).is_err());
        assert!(validate_required(&"   ".to_string()).is_err());
    }

    #[test]
    fn accepts_non_blank_values() {
        assert!(validate_required(&"road trip".to_string()).is_ok());
    }
}
