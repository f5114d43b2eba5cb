use regex::Regex;
use validator::ValidationError;

pub fn validate_content(u: &String) -> Result<(), ValidationError> {
    if u.trim().is_empty() {
        return Err(ValidationError::new("").with_message("Content cannot be empty".into()));
    }

    Ok(())
}

pub fn validate_username(u: &String) -> Result<(), ValidationError> {
    let regex = Regex::new(r"^[A-Za-z0-9_]{5,}$").unwrap();

    if !regex.is_match(u) {
        return Err(ValidationError::new("")
            .with_message("Letters, numbers and '_'. Minimum 5 characters".into()));
    }

    Ok(())
}
