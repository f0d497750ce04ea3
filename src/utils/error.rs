use thiserror::Error;

#[derive(Error, Debug)]
pub enum SigaError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid {field}: {reason}")]
    InvalidFieldError { field: String, reason: String },

    #[error("{entity} with {key} '{value}' already exists")]
    DuplicateError {
        entity: &'static str,
        key: &'static str,
        value: String,
    },

    #[error("{entity} '{key}' does not exist")]
    UnknownReferenceError { entity: &'static str, key: String },

    #[error("student '{student_id}' already has an inscription for course '{course_code}'")]
    AlreadyInscribedError {
        student_id: String,
        course_code: String,
    },

    #[error("inscription '{inscription_id}' has already been matriculated")]
    AlreadyMatriculatedError { inscription_id: String },

    #[error("student '{student_id}' is already enrolled in course '{course_code}'")]
    AlreadyEnrolledError {
        student_id: String,
        course_code: String,
    },

    #[error("enrollment '{enrollment_id}' already carries a grade")]
    AlreadyGradedError { enrollment_id: String },

    #[error("grade {value} is outside the allowed range 0.0-5.0")]
    GradeOutOfRangeError { value: f64 },

    #[error("credit count {value} is outside the allowed range 1-10")]
    CreditsOutOfRangeError { value: u8 },

    #[error("{entity} '{key}' still has {inscriptions} inscription(s) and {enrollments} enrollment(s); remove them first or request a cascade")]
    HasDependentsError {
        entity: &'static str,
        key: String,
        inscriptions: usize,
        enrollments: usize,
    },
}

pub type Result<T> = std::result::Result<T, SigaError>;
