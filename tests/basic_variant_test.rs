//! Coverage for the simpler data model compiled without the `inscriptions`
//! feature: enrollments are created directly, with duplicate-pair rejection.
//! Run with `cargo test --no-default-features --features cli`.
#![cfg(not(feature = "inscriptions"))]

use chrono::NaiveDate;
use minisiga::domain::model::{Course, Student};
use minisiga::{Registry, Reports, SigaError};

fn student(id: &str, document: &str, email: &str) -> Student {
    Student {
        id: id.to_string(),
        document: document.to_string(),
        given_names: "Test".to_string(),
        surname: "Student".to_string(),
        email: email.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
    }
}

fn course(code: &str, credits: u8) -> Course {
    Course {
        code: code.to_string(),
        name: "Course".to_string(),
        credits,
        instructor: "Dr. Test".to_string(),
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
}

fn base_registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .add_student(student("1", "12345678", "a@test.com"))
        .unwrap();
    registry
        .add_student(student("2", "87654321", "b@test.com"))
        .unwrap();
    registry.add_course(course("MAT101", 3)).unwrap();
    registry.add_course(course("FIS101", 4)).unwrap();
    registry
}

#[test]
fn test_enroll_rejects_duplicate_pair() {
    let mut registry = base_registry();
    registry.enroll("1", "MAT101", date()).unwrap();

    let result = registry.enroll("1", "MAT101", date());
    assert!(matches!(result, Err(SigaError::AlreadyEnrolledError { .. })));
    assert_eq!(registry.enrollments().len(), 1);

    registry.enroll("1", "FIS101", date()).unwrap();
    registry.enroll("2", "MAT101", date()).unwrap();
    assert_eq!(registry.enrollments().len(), 3);
}

#[test]
fn test_enroll_rejects_unknown_references() {
    let mut registry = base_registry();
    assert!(registry.enroll("ghost", "MAT101", date()).is_err());
    assert!(registry.enroll("1", "NOPE", date()).is_err());
    assert!(registry.enrollments().is_empty());
}

#[test]
fn test_grade_lifecycle() {
    let mut registry = base_registry();
    let enrollment = registry.enroll("1", "MAT101", date()).unwrap();

    assert!(registry.assign_grade(&enrollment, 5.5).is_err());
    registry.assign_grade(&enrollment, 4.0).unwrap();
    assert!(matches!(
        registry.assign_grade(&enrollment, 3.0),
        Err(SigaError::AlreadyGradedError { .. })
    ));
    assert_eq!(registry.enrollments()[0].grade, Some(4.0));
}

#[test]
fn test_remove_student_cascades_enrollments() {
    let mut registry = base_registry();
    registry.enroll("1", "MAT101", date()).unwrap();
    registry.enroll("1", "FIS101", date()).unwrap();
    registry.enroll("2", "MAT101", date()).unwrap();

    assert!(registry.remove_student("1", false).is_err());

    let report = registry.remove_student("1", true).unwrap();
    assert_eq!(report.enrollments, 2);
    assert_eq!(report.inscriptions, 0);
    assert_eq!(registry.enrollments().len(), 1);
    assert_eq!(registry.enrollments()[0].student_id, "2");
}

#[test]
fn test_rename_course_updates_enrollments() {
    let mut registry = base_registry();
    registry.enroll("1", "MAT101", date()).unwrap();
    registry.enroll("2", "MAT101", date()).unwrap();

    let report = registry.rename_course("MAT101", "MAT201").unwrap();
    assert_eq!(report.enrollments, 2);
    assert!(registry.enrollments().iter().all(|e| e.course_code == "MAT201"));

    let report = registry.rename_course("MAT201", "MAT101").unwrap();
    assert_eq!(report.enrollments, 2);
    assert!(registry.enrollments().iter().all(|e| e.course_code == "MAT101"));
}

#[test]
fn test_reports_work_without_inscriptions() {
    let mut registry = base_registry();
    let e1 = registry.enroll("1", "MAT101", date()).unwrap();
    let e2 = registry.enroll("2", "MAT101", date()).unwrap();
    let e3 = registry.enroll("1", "FIS101", date()).unwrap();
    registry.assign_grade(&e1, 4.5).unwrap();
    registry.assign_grade(&e2, 2.0).unwrap();
    registry.assign_grade(&e3, 3.5).unwrap();

    let reports = Reports::new(&registry);
    let top = reports.top_grades_for_course("MAT101", 3);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].1, 4.5);

    let failing = reports.failing_enrollments(3.0);
    assert_eq!(failing.len(), 1);
    assert_eq!(failing[0].0.id, "2");

    assert_eq!(reports.credit_load("1"), 7);
}
