use crate::domain::model::{Course, Enrollment, Student};
#[cfg(feature = "inscriptions")]
use crate::domain::model::Inscription;
use crate::utils::error::{Result, SigaError};
use crate::utils::validation::{is_valid_credits, is_valid_grade};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

/// Counts of dependent records removed by a cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub inscriptions: usize,
    pub enrollments: usize,
}

/// Counts of foreign-key references updated by a course code rename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameReport {
    pub inscriptions: usize,
    pub enrollments: usize,
}

/// The entity store. Owns the flat collections and is the only place records
/// are inserted or removed, so uniqueness and referential checks live here.
/// Reads go through [`crate::core::reports::Reports`].
///
/// Mutations are all-or-nothing: a declined operation returns an error and
/// leaves every collection untouched. Cascades and renames are a single
/// in-memory pass with no rollback, which is acceptable for a single-process,
/// single-session tool.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registry {
    students: Vec<Student>,
    courses: Vec<Course>,
    #[cfg(feature = "inscriptions")]
    inscriptions: Vec<Inscription>,
    enrollments: Vec<Enrollment>,
}

/// Session-unique 8-character identifier for new records.
pub(crate) fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SigaError::InvalidFieldError {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "inscriptions")]
    pub fn from_parts(
        students: Vec<Student>,
        courses: Vec<Course>,
        inscriptions: Vec<Inscription>,
        enrollments: Vec<Enrollment>,
    ) -> Self {
        Self {
            students,
            courses,
            inscriptions,
            enrollments,
        }
    }

    #[cfg(not(feature = "inscriptions"))]
    pub fn from_parts(
        students: Vec<Student>,
        courses: Vec<Course>,
        enrollments: Vec<Enrollment>,
    ) -> Self {
        Self {
            students,
            courses,
            enrollments,
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[cfg(feature = "inscriptions")]
    pub fn inscriptions(&self) -> &[Inscription] {
        &self.inscriptions
    }

    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    // ---- students ----

    pub fn add_student(&mut self, student: Student) -> Result<()> {
        require("id", &student.id)?;
        require("document", &student.document)?;
        require("given names", &student.given_names)?;
        require("surname", &student.surname)?;
        require("email", &student.email)?;
        self.check_student_uniqueness(&student, None)?;

        tracing::debug!(id = %student.id, "student added");
        self.students.push(student);
        Ok(())
    }

    /// Replaces the stored student with the same id. The id itself is
    /// immutable; document and email stay unique across the other students.
    pub fn update_student(&mut self, updated: Student) -> Result<()> {
        require("document", &updated.document)?;
        require("given names", &updated.given_names)?;
        require("surname", &updated.surname)?;
        require("email", &updated.email)?;

        let position = self
            .students
            .iter()
            .position(|s| s.id == updated.id)
            .ok_or_else(|| SigaError::UnknownReferenceError {
                entity: "student",
                key: updated.id.clone(),
            })?;
        self.check_student_uniqueness(&updated, Some(position))?;

        self.students[position] = updated;
        Ok(())
    }

    pub fn remove_student(&mut self, id: &str, cascade: bool) -> Result<CascadeReport> {
        if !self.students.iter().any(|s| s.id == id) {
            return Err(SigaError::UnknownReferenceError {
                entity: "student",
                key: id.to_string(),
            });
        }

        let report = CascadeReport {
            #[cfg(feature = "inscriptions")]
            inscriptions: self
                .inscriptions
                .iter()
                .filter(|i| i.student_id == id)
                .count(),
            #[cfg(not(feature = "inscriptions"))]
            inscriptions: 0,
            enrollments: self
                .enrollments
                .iter()
                .filter(|e| e.student_id == id)
                .count(),
        };

        if !cascade && (report.inscriptions > 0 || report.enrollments > 0) {
            return Err(SigaError::HasDependentsError {
                entity: "student",
                key: id.to_string(),
                inscriptions: report.inscriptions,
                enrollments: report.enrollments,
            });
        }

        #[cfg(feature = "inscriptions")]
        self.inscriptions.retain(|i| i.student_id != id);
        self.enrollments.retain(|e| e.student_id != id);
        self.students.retain(|s| s.id != id);

        tracing::info!(
            id,
            inscriptions = report.inscriptions,
            enrollments = report.enrollments,
            "student removed"
        );
        Ok(report)
    }

    fn check_student_uniqueness(&self, student: &Student, skip: Option<usize>) -> Result<()> {
        let email = student.email.to_lowercase();
        for (position, existing) in self.students.iter().enumerate() {
            if Some(position) == skip {
                continue;
            }
            if existing.id == student.id {
                return Err(SigaError::DuplicateError {
                    entity: "student",
                    key: "id",
                    value: student.id.clone(),
                });
            }
            if existing.document == student.document {
                return Err(SigaError::DuplicateError {
                    entity: "student",
                    key: "document",
                    value: student.document.clone(),
                });
            }
            if existing.email.to_lowercase() == email {
                return Err(SigaError::DuplicateError {
                    entity: "student",
                    key: "email",
                    value: student.email.clone(),
                });
            }
        }
        Ok(())
    }

    // ---- courses ----

    pub fn add_course(&mut self, course: Course) -> Result<()> {
        require("code", &course.code)?;
        require("name", &course.name)?;
        require("instructor", &course.instructor)?;
        if !is_valid_credits(course.credits) {
            return Err(SigaError::CreditsOutOfRangeError {
                value: course.credits,
            });
        }
        if self.courses.iter().any(|c| c.code == course.code) {
            return Err(SigaError::DuplicateError {
                entity: "course",
                key: "code",
                value: course.code,
            });
        }

        tracing::debug!(code = %course.code, "course added");
        self.courses.push(course);
        Ok(())
    }

    /// Replaces name, credits and instructor of the course with the same
    /// code. Changing the code itself goes through [`Registry::rename_course`]
    /// so foreign keys are kept in step.
    pub fn update_course(&mut self, updated: Course) -> Result<()> {
        require("name", &updated.name)?;
        require("instructor", &updated.instructor)?;
        if !is_valid_credits(updated.credits) {
            return Err(SigaError::CreditsOutOfRangeError {
                value: updated.credits,
            });
        }

        let position = self
            .courses
            .iter()
            .position(|c| c.code == updated.code)
            .ok_or_else(|| SigaError::UnknownReferenceError {
                entity: "course",
                key: updated.code.clone(),
            })?;

        self.courses[position] = updated;
        Ok(())
    }

    pub fn remove_course(&mut self, code: &str, cascade: bool) -> Result<CascadeReport> {
        if !self.courses.iter().any(|c| c.code == code) {
            return Err(SigaError::UnknownReferenceError {
                entity: "course",
                key: code.to_string(),
            });
        }

        let report = CascadeReport {
            #[cfg(feature = "inscriptions")]
            inscriptions: self
                .inscriptions
                .iter()
                .filter(|i| i.course_code == code)
                .count(),
            #[cfg(not(feature = "inscriptions"))]
            inscriptions: 0,
            enrollments: self
                .enrollments
                .iter()
                .filter(|e| e.course_code == code)
                .count(),
        };

        if !cascade && (report.inscriptions > 0 || report.enrollments > 0) {
            return Err(SigaError::HasDependentsError {
                entity: "course",
                key: code.to_string(),
                inscriptions: report.inscriptions,
                enrollments: report.enrollments,
            });
        }

        #[cfg(feature = "inscriptions")]
        self.inscriptions.retain(|i| i.course_code != code);
        self.enrollments.retain(|e| e.course_code != code);
        self.courses.retain(|c| c.code != code);

        tracing::info!(
            code,
            inscriptions = report.inscriptions,
            enrollments = report.enrollments,
            "course removed"
        );
        Ok(report)
    }

    /// Renames a course code and rewrites every inscription and enrollment
    /// that referenced the old code, all in one pass.
    pub fn rename_course(&mut self, old_code: &str, new_code: &str) -> Result<RenameReport> {
        require("code", new_code)?;

        let position = self
            .courses
            .iter()
            .position(|c| c.code == old_code)
            .ok_or_else(|| SigaError::UnknownReferenceError {
                entity: "course",
                key: old_code.to_string(),
            })?;

        if new_code == old_code {
            return Ok(RenameReport::default());
        }
        if self.courses.iter().any(|c| c.code == new_code) {
            return Err(SigaError::DuplicateError {
                entity: "course",
                key: "code",
                value: new_code.to_string(),
            });
        }

        self.courses[position].code = new_code.to_string();

        let mut report = RenameReport::default();
        #[cfg(feature = "inscriptions")]
        for inscription in &mut self.inscriptions {
            if inscription.course_code == old_code {
                inscription.course_code = new_code.to_string();
                report.inscriptions += 1;
            }
        }
        for enrollment in &mut self.enrollments {
            if enrollment.course_code == old_code {
                enrollment.course_code = new_code.to_string();
                report.enrollments += 1;
            }
        }

        tracing::info!(
            old_code,
            new_code,
            inscriptions = report.inscriptions,
            enrollments = report.enrollments,
            "course renamed"
        );
        Ok(report)
    }

    // ---- enrollment lifecycle ----

    /// Records a student's intent to enroll. At most one inscription may
    /// exist per (student, course) pair.
    #[cfg(feature = "inscriptions")]
    pub fn inscribe(
        &mut self,
        student_id: &str,
        course_code: &str,
        inscribed_on: NaiveDate,
    ) -> Result<String> {
        self.resolve_pair(student_id, course_code)?;
        if self
            .inscriptions
            .iter()
            .any(|i| i.student_id == student_id && i.course_code == course_code)
        {
            return Err(SigaError::AlreadyInscribedError {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            });
        }

        let id = short_id();
        self.inscriptions.push(Inscription {
            id: id.clone(),
            student_id: student_id.to_string(),
            course_code: course_code.to_string(),
            inscribed_on,
        });

        tracing::debug!(id = %id, student_id, course_code, "inscription created");
        Ok(id)
    }

    /// Converts an inscription into an enrollment. Each inscription can be
    /// converted once.
    #[cfg(feature = "inscriptions")]
    pub fn matriculate(&mut self, inscription_id: &str, enrolled_on: NaiveDate) -> Result<String> {
        let inscription = self
            .inscriptions
            .iter()
            .find(|i| i.id == inscription_id)
            .ok_or_else(|| SigaError::UnknownReferenceError {
                entity: "inscription",
                key: inscription_id.to_string(),
            })?;
        if self
            .enrollments
            .iter()
            .any(|e| e.inscription_id == inscription_id)
        {
            return Err(SigaError::AlreadyMatriculatedError {
                inscription_id: inscription_id.to_string(),
            });
        }

        let id = short_id();
        let enrollment = Enrollment {
            id: id.clone(),
            student_id: inscription.student_id.clone(),
            course_code: inscription.course_code.clone(),
            inscription_id: inscription_id.to_string(),
            enrolled_on,
            grade: None,
        };
        self.enrollments.push(enrollment);

        tracing::debug!(id = %id, inscription_id, "enrollment created");
        Ok(id)
    }

    /// Enrolls a student directly. At most one enrollment may exist per
    /// (student, course) pair.
    #[cfg(not(feature = "inscriptions"))]
    pub fn enroll(
        &mut self,
        student_id: &str,
        course_code: &str,
        enrolled_on: NaiveDate,
    ) -> Result<String> {
        self.resolve_pair(student_id, course_code)?;
        if self
            .enrollments
            .iter()
            .any(|e| e.student_id == student_id && e.course_code == course_code)
        {
            return Err(SigaError::AlreadyEnrolledError {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            });
        }

        let id = short_id();
        self.enrollments.push(Enrollment {
            id: id.clone(),
            student_id: student_id.to_string(),
            course_code: course_code.to_string(),
            enrolled_on,
            grade: None,
        });

        tracing::debug!(id = %id, student_id, course_code, "enrollment created");
        Ok(id)
    }

    /// Sets the grade of an ungraded enrollment. There is no re-grading:
    /// once a grade is present the enrollment is final.
    pub fn assign_grade(&mut self, enrollment_id: &str, grade: f64) -> Result<()> {
        let enrollment = self
            .enrollments
            .iter_mut()
            .find(|e| e.id == enrollment_id)
            .ok_or_else(|| SigaError::UnknownReferenceError {
                entity: "enrollment",
                key: enrollment_id.to_string(),
            })?;
        if !is_valid_grade(grade) {
            return Err(SigaError::GradeOutOfRangeError { value: grade });
        }
        if enrollment.grade.is_some() {
            return Err(SigaError::AlreadyGradedError {
                enrollment_id: enrollment_id.to_string(),
            });
        }

        enrollment.grade = Some(grade);
        tracing::debug!(enrollment_id, grade, "grade assigned");
        Ok(())
    }

    /// Removes an inscription together with the enrollment converted from it,
    /// if any.
    #[cfg(feature = "inscriptions")]
    pub fn remove_inscription(&mut self, id: &str) -> Result<CascadeReport> {
        if !self.inscriptions.iter().any(|i| i.id == id) {
            return Err(SigaError::UnknownReferenceError {
                entity: "inscription",
                key: id.to_string(),
            });
        }

        let enrollments = self
            .enrollments
            .iter()
            .filter(|e| e.inscription_id == id)
            .count();
        self.enrollments.retain(|e| e.inscription_id != id);
        self.inscriptions.retain(|i| i.id != id);

        tracing::info!(id, enrollments, "inscription removed");
        Ok(CascadeReport {
            inscriptions: 0,
            enrollments,
        })
    }

    pub fn remove_enrollment(&mut self, id: &str) -> Result<()> {
        if !self.enrollments.iter().any(|e| e.id == id) {
            return Err(SigaError::UnknownReferenceError {
                entity: "enrollment",
                key: id.to_string(),
            });
        }
        self.enrollments.retain(|e| e.id != id);
        Ok(())
    }

    fn resolve_pair(&self, student_id: &str, course_code: &str) -> Result<()> {
        if !self.students.iter().any(|s| s.id == student_id) {
            return Err(SigaError::UnknownReferenceError {
                entity: "student",
                key: student_id.to_string(),
            });
        }
        if !self.courses.iter().any(|c| c.code == course_code) {
            return Err(SigaError::UnknownReferenceError {
                entity: "course",
                key: course_code.to_string(),
            });
        }
        Ok(())
    }
}
