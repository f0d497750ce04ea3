use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub document: String,
    pub given_names: String,
    pub surname: String,
    pub email: String,
    pub birth_date: NaiveDate,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_names, self.surname)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub credits: u8,
    pub instructor: String,
}

/// Intent to enroll; a precursor that `matriculate` later converts into an
/// [`Enrollment`].
#[cfg(feature = "inscriptions")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inscription {
    pub id: String,
    pub student_id: String,
    pub course_code: String,
    pub inscribed_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    pub course_code: String,
    #[cfg(feature = "inscriptions")]
    pub inscription_id: String,
    pub enrolled_on: NaiveDate,
    /// `None` means not yet graded.
    pub grade: Option<f64>,
}
