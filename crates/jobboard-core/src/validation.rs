//! Input validators, composed before entity construction.
//!
//! Each validator is a pure function returning the list of violations it
//! found; an empty list means the input is acceptable.

/// Full name must be two words with only alphabetic characters and a single
/// space between them.
pub fn validate_name(name: &str) -> Vec<String> {
    let parts: Vec<&str> = name.split(' ').collect();
    let two_alpha_words = parts.len() == 2
        && parts
            .iter()
            .all(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_alphabetic()));

    if two_alpha_words {
        Vec::new()
    } else {
        vec![
            "Full name must be two words with only alphabets and a single space between them."
                .to_string(),
        ]
    }
}

/// Minimal structural check on the address; uniqueness is the store's job.
pub fn validate_email(email: &str) -> Vec<String> {
    let mut errors = Vec::new();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => errors.push("Invalid email address.".to_string()),
    }
    errors
}

/// Password strength: at least 8 characters, with upper, lower, digit and a
/// special character (anything outside word characters and whitespace).
pub fn validate_password(password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain an uppercase letter.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain a lowercase letter.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain a number.".to_string());
    }
    let is_special = |c: char| !c.is_alphanumeric() && c != '_' && !c.is_whitespace();
    if !password.chars().any(is_special) {
        errors.push("Password must contain a special character.".to_string());
    }

    errors
}

/// All signup rules together.
pub fn validate_signup(name: &str, email: &str, password: &str) -> Vec<String> {
    let mut errors = validate_name(name);
    errors.extend(validate_email(email));
    errors.extend(validate_password(password));
    errors
}

pub fn validate_job_title(title: &str) -> Vec<String> {
    let len = title.chars().count();
    if (1..=100).contains(&len) {
        Vec::new()
    } else {
        vec!["Title must be between 1 and 100 characters.".to_string()]
    }
}

pub fn validate_job_description(description: &str) -> Vec<String> {
    let len = description.chars().count();
    if (20..=2000).contains(&len) {
        Vec::new()
    } else {
        vec!["Description must be between 20 and 2000 characters.".to_string()]
    }
}

pub fn validate_cover_letter(cover_letter: &str) -> Vec<String> {
    if cover_letter.chars().count() <= 200 {
        Vec::new()
    } else {
        vec!["Cover letter must be at most 200 characters.".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert!(validate_name("Jane Doe").is_empty());
    }

    #[test]
    fn test_invalid_names() {
        assert!(!validate_name("Jane").is_empty());
        assert!(!validate_name("Jane  Doe").is_empty());
        assert!(!validate_name("Jane Doe Smith").is_empty());
        assert!(!validate_name("J4ne Doe").is_empty());
        assert!(!validate_name(" Jane Doe").is_empty());
        assert!(!validate_name("").is_empty());
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_email("jane@x.com").is_empty());
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!validate_email("jane").is_empty());
        assert!(!validate_email("@x.com").is_empty());
        assert!(!validate_email("jane@host").is_empty());
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(validate_password("Abcdef1!").is_empty());
    }

    #[test]
    fn test_weak_passwords_rejected() {
        // Too short
        assert!(!validate_password("Ab1!").is_empty());
        // Missing character classes, one at a time
        assert!(!validate_password("abcdef1!").is_empty());
        assert!(!validate_password("ABCDEF1!").is_empty());
        assert!(!validate_password("Abcdefg!").is_empty());
        assert!(!validate_password("Abcdefg1").is_empty());
        // Underscore does not count as a special character
        assert!(!validate_password("Abcdefg1_").is_empty());
    }

    #[test]
    fn test_validate_signup_collects_all_violations() {
        let errors = validate_signup("Jane", "not-an-email", "weak");
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_job_field_bounds() {
        assert!(!validate_job_title("").is_empty());
        assert!(!validate_job_title(&"x".repeat(101)).is_empty());
        assert!(validate_job_title("Backend Engineer").is_empty());

        assert!(!validate_job_description("too short").is_empty());
        assert!(validate_job_description(&"d".repeat(20)).is_empty());
        assert!(!validate_job_description(&"d".repeat(2001)).is_empty());

        assert!(validate_cover_letter(&"c".repeat(200)).is_empty());
        assert!(!validate_cover_letter(&"c".repeat(201)).is_empty());
    }
}
