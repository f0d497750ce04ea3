use crate::utils::error::Result;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

pub const DOCUMENT_MIN_LEN: usize = 6;
pub const DOCUMENT_MAX_LEN: usize = 15;
pub const CREDITS_MIN: u8 = 1;
pub const CREDITS_MAX: u8 = 10;
pub const GRADE_MIN: f64 = 0.0;
pub const GRADE_MAX: f64 = 5.0;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Document numbers are digits only, 6 to 15 characters.
pub fn is_valid_document(document: &str) -> bool {
    (DOCUMENT_MIN_LEN..=DOCUMENT_MAX_LEN).contains(&document.len())
        && document.chars().all(|c| c.is_ascii_digit())
}

/// Parses a `YYYY-MM-DD` date, rejecting impossible calendar dates.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn is_valid_credits(credits: u8) -> bool {
    (CREDITS_MIN..=CREDITS_MAX).contains(&credits)
}

pub fn is_valid_grade(grade: f64) -> bool {
    (GRADE_MIN..=GRADE_MAX).contains(&grade)
}

/// Raw student fields as collected from the operator, before any parsing.
#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    pub document: String,
    pub given_names: String,
    pub surname: String,
    pub email: String,
    pub birth_date: String,
}

/// Checks every field of a student form and returns all problems at once,
/// so the operator sees the full list instead of fixing one at a time.
pub fn validate_student_form(form: &StudentForm) -> Vec<String> {
    let mut errors = Vec::new();

    if form.document.is_empty() {
        errors.push("document is required".to_string());
    } else if !is_valid_document(&form.document) {
        errors.push(format!(
            "document must contain only digits and have {}-{} characters",
            DOCUMENT_MIN_LEN, DOCUMENT_MAX_LEN
        ));
    }

    if form.given_names.trim().is_empty() {
        errors.push("given names are required".to_string());
    }

    if form.surname.trim().is_empty() {
        errors.push("surname is required".to_string());
    }

    if form.email.is_empty() {
        errors.push("email is required".to_string());
    } else if !is_valid_email(&form.email) {
        errors.push("email format is not valid".to_string());
    }

    if form.birth_date.is_empty() {
        errors.push("birth date is required".to_string());
    } else if parse_date(&form.birth_date).is_none() {
        errors.push("birth date must be a valid YYYY-MM-DD date".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("test@email.com"));
        assert!(is_valid_email("user.name@universidad.edu.co"));
        assert!(is_valid_email("123@test.org"));
        assert!(!is_valid_email("no_at_sign"));
        assert!(!is_valid_email("@domain.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@domain"));
    }

    #[test]
    fn test_is_valid_document() {
        assert!(is_valid_document("123456"));
        assert!(is_valid_document("12345678901"));
        assert!(is_valid_document("123456789012345"));
        assert!(!is_valid_document("12345"));
        assert!(!is_valid_document("1234567890123456"));
        assert!(!is_valid_document("12345abc"));
        assert!(!is_valid_document(""));
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-02-15").is_some());
        assert!(parse_date("1995-12-31").is_some());
        assert!(parse_date("2024-13-15").is_none());
        assert!(parse_date("2024-02-30").is_none());
        assert!(parse_date("15-02-2024").is_none());
        assert!(parse_date("2024/02/15").is_none());
    }

    #[test]
    fn test_is_valid_credits() {
        assert!(is_valid_credits(1));
        assert!(is_valid_credits(5));
        assert!(is_valid_credits(10));
        assert!(!is_valid_credits(0));
        assert!(!is_valid_credits(11));
    }

    #[test]
    fn test_is_valid_grade() {
        assert!(is_valid_grade(0.0));
        assert!(is_valid_grade(2.5));
        assert!(is_valid_grade(5.0));
        assert!(!is_valid_grade(-0.1));
        assert!(!is_valid_grade(5.1));
    }

    #[test]
    fn test_validate_student_form_reports_all_errors() {
        let form = StudentForm {
            document: "12a".to_string(),
            given_names: " ".to_string(),
            surname: String::new(),
            email: "broken".to_string(),
            birth_date: "2024-13-01".to_string(),
        };

        let errors = validate_student_form(&form);
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_validate_student_form_accepts_valid_input() {
        let form = StudentForm {
            document: "12345678".to_string(),
            given_names: "Juan Carlos".to_string(),
            surname: "Pérez García".to_string(),
            email: "juan.perez@email.com".to_string(),
            birth_date: "1995-06-15".to_string(),
        };

        assert!(validate_student_form(&form).is_empty());
    }
}
