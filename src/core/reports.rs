use crate::core::registry::Registry;
use crate::domain::model::{Course, Student};
use std::cmp::Ordering;
use std::collections::BTreeSet;

pub const DEFAULT_PASSING_THRESHOLD: f64 = 3.0;
pub const DEFAULT_TOP_N: usize = 3;

/// Read-only queries over the registry. Every lookup miss is `None` or an
/// empty `Vec`; enrollments whose student or course no longer resolves are
/// skipped rather than reported.
pub struct Reports<'a> {
    registry: &'a Registry,
}

impl<'a> Reports<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn find_student_by_id(&self, id: &str) -> Option<&'a Student> {
        self.registry.students().iter().find(|s| s.id == id)
    }

    pub fn find_student_by_document(&self, document: &str) -> Option<&'a Student> {
        self.registry
            .students()
            .iter()
            .find(|s| s.document == document)
    }

    pub fn find_student_by_email(&self, email: &str) -> Option<&'a Student> {
        let email = email.to_lowercase();
        self.registry
            .students()
            .iter()
            .find(|s| s.email.to_lowercase() == email)
    }

    pub fn find_course_by_code(&self, code: &str) -> Option<&'a Course> {
        self.registry.courses().iter().find(|c| c.code == code)
    }

    /// Students ordered by surname, case-insensitive ascending. The sort is
    /// stable, so students with equal surnames keep their insertion order.
    pub fn students_by_surname(&self) -> Vec<&'a Student> {
        let mut sorted: Vec<&Student> = self.registry.students().iter().collect();
        sorted.sort_by(|a, b| a.surname.to_lowercase().cmp(&b.surname.to_lowercase()));
        sorted
    }

    /// Binary search over a freshly sorted surname sequence, so the result is
    /// always consistent with the current data at the cost of an O(n log n)
    /// sort per call.
    pub fn binary_search_by_surname(&self, surname: &str) -> Option<&'a Student> {
        let sorted = self.students_by_surname();
        if sorted.is_empty() {
            return None;
        }

        let target = surname.to_lowercase();
        let mut low = 0usize;
        let mut high = sorted.len() - 1;

        while low <= high {
            let mid = (low + high) / 2;
            match sorted[mid].surname.to_lowercase().cmp(&target) {
                Ordering::Equal => return Some(sorted[mid]),
                Ordering::Less => low = mid + 1,
                Ordering::Greater => {
                    if mid == 0 {
                        return None;
                    }
                    high = mid - 1;
                }
            }
        }

        None
    }

    /// The `n` best graded enrollments of a course, descending by grade.
    /// Ties keep the enrollment-list order; no other tiebreak is defined.
    pub fn top_grades_for_course(&self, course_code: &str, n: usize) -> Vec<(&'a Student, f64)> {
        let mut ranked: Vec<(&Student, f64)> = self
            .registry
            .enrollments()
            .iter()
            .filter(|e| e.course_code == course_code)
            .filter_map(|e| {
                let grade = e.grade?;
                let student = self.find_student_by_id(&e.student_id)?;
                Some((student, grade))
            })
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// All graded enrollments strictly below the passing threshold, resolved
    /// to student and course.
    pub fn failing_enrollments(
        &self,
        passing_threshold: f64,
    ) -> Vec<(&'a Student, &'a Course, f64)> {
        self.registry
            .enrollments()
            .iter()
            .filter_map(|e| {
                let grade = e.grade?;
                if grade >= passing_threshold {
                    return None;
                }
                let student = self.find_student_by_id(&e.student_id)?;
                let course = self.find_course_by_code(&e.course_code)?;
                Some((student, course, grade))
            })
            .collect()
    }

    /// Sum of the credit counts of every course the student is enrolled in.
    /// Course codes that no longer resolve contribute nothing.
    pub fn credit_load(&self, student_id: &str) -> u32 {
        self.registry
            .enrollments()
            .iter()
            .filter(|e| e.student_id == student_id)
            .filter_map(|e| self.find_course_by_code(&e.course_code))
            .map(|c| u32::from(c.credits))
            .sum()
    }

    /// Distinct email domains across all students, ascending. Emails without
    /// an `@` are skipped.
    pub fn unique_email_domains(&self) -> Vec<String> {
        let domains: BTreeSet<String> = self
            .registry
            .students()
            .iter()
            .filter_map(|s| s.email.split('@').nth(1))
            .map(str::to_string)
            .collect();
        domains.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Student;
    use chrono::NaiveDate;

    fn student(id: &str, surname: &str, email: &str) -> Student {
        Student {
            id: id.to_string(),
            document: format!("10000{id}"),
            given_names: "Test".to_string(),
            surname: surname.to_string(),
            email: email.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
        }
    }

    fn registry_with(students: Vec<Student>) -> Registry {
        let mut registry = Registry::new();
        for s in students {
            registry.add_student(s).unwrap();
        }
        registry
    }

    #[test]
    fn test_binary_search_on_empty_registry() {
        let registry = Registry::new();
        let reports = Reports::new(&registry);
        assert!(reports.binary_search_by_surname("Anyone").is_none());
    }

    #[test]
    fn test_binary_search_first_and_last_positions() {
        let registry = registry_with(vec![
            student("1", "Zapata", "z@test.com"),
            student("2", "Arango", "a@test.com"),
            student("3", "Mora", "m@test.com"),
        ]);
        let reports = Reports::new(&registry);

        assert_eq!(reports.binary_search_by_surname("Arango").unwrap().id, "2");
        assert_eq!(reports.binary_search_by_surname("Zapata").unwrap().id, "1");
        assert_eq!(reports.binary_search_by_surname("Mora").unwrap().id, "3");
        // A target below the first element must not underflow.
        assert!(reports.binary_search_by_surname("Aaa").is_none());
    }

    #[test]
    fn test_email_domain_without_at_is_skipped() {
        // The store never admits such an email, but loaded files may carry
        // legacy rows; the report tolerates them.
        let registry = Registry::from_parts(
            vec![
                student("1", "Pérez", "juan@test.com"),
                Student {
                    email: "broken-address".to_string(),
                    ..student("2", "Mora", "x@x.com")
                },
            ],
            Vec::new(),
            #[cfg(feature = "inscriptions")]
            Vec::new(),
            Vec::new(),
        );
        let reports = Reports::new(&registry);
        assert_eq!(reports.unique_email_domains(), vec!["test.com"]);
    }
}
