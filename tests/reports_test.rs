#![cfg(feature = "inscriptions")]

use chrono::NaiveDate;
use minisiga::domain::model::{Course, Enrollment, Student};
use minisiga::{Registry, Reports};

fn student(id: &str, document: &str, given_names: &str, surname: &str, email: &str) -> Student {
    Student {
        id: id.to_string(),
        document: document.to_string(),
        given_names: given_names.to_string(),
        surname: surname.to_string(),
        email: email.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
    }
}

fn course(code: &str, name: &str, credits: u8) -> Course {
    Course {
        code: code.to_string(),
        name: name.to_string(),
        credits,
        instructor: "Dr. López".to_string(),
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
}

/// Juan, María and Ana in MAT101 with grades 4.5, 3.8 and 2.1; Juan also has
/// an ungraded enrollment in FIS101.
fn sample_registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .add_student(student("1", "12345678", "Juan", "Pérez", "juan@test.com"))
        .unwrap();
    registry
        .add_student(student("2", "87654321", "María", "González", "maria@test.com"))
        .unwrap();
    registry
        .add_student(student("3", "11111111", "Ana", "López", "ana@test.com"))
        .unwrap();
    registry
        .add_course(course("MAT101", "Matemáticas", 3))
        .unwrap();
    registry.add_course(course("FIS101", "Física", 4)).unwrap();

    for (id, grade) in [("1", 4.5), ("2", 3.8), ("3", 2.1)] {
        let inscription = registry.inscribe(id, "MAT101", date()).unwrap();
        let enrollment = registry.matriculate(&inscription, date()).unwrap();
        registry.assign_grade(&enrollment, grade).unwrap();
    }
    let inscription = registry.inscribe("1", "FIS101", date()).unwrap();
    registry.matriculate(&inscription, date()).unwrap();

    registry
}

#[test]
fn test_find_student_by_document() {
    let registry = sample_registry();
    let reports = Reports::new(&registry);

    assert_eq!(
        reports.find_student_by_document("12345678").unwrap().given_names,
        "Juan"
    );
    assert!(reports.find_student_by_document("99999999").is_none());
}

#[test]
fn test_find_student_by_email_is_case_insensitive() {
    let registry = sample_registry();
    let reports = Reports::new(&registry);

    assert_eq!(
        reports.find_student_by_email("maria@test.com").unwrap().surname,
        "González"
    );
    assert_eq!(
        reports.find_student_by_email("MARIA@TEST.COM").unwrap().surname,
        "González"
    );
    assert!(reports.find_student_by_email("nobody@test.com").is_none());
}

#[test]
fn test_students_by_surname_orders_ascending() {
    let registry = sample_registry();
    let reports = Reports::new(&registry);

    let sorted = reports.students_by_surname();
    let surnames: Vec<&str> = sorted.iter().map(|s| s.surname.as_str()).collect();
    assert_eq!(surnames, vec!["González", "López", "Pérez"]);
}

#[test]
fn test_sort_is_stable_for_equal_surnames() {
    let mut registry = Registry::new();
    registry
        .add_student(student("1", "111111", "First", "Gomez", "a@test.com"))
        .unwrap();
    registry
        .add_student(student("2", "222222", "Second", "gomez", "b@test.com"))
        .unwrap();
    registry
        .add_student(student("3", "333333", "Other", "Alvarez", "c@test.com"))
        .unwrap();
    registry
        .add_student(student("4", "444444", "Third", "GOMEZ", "d@test.com"))
        .unwrap();

    let reports = Reports::new(&registry);
    let ids: Vec<&str> = reports.students_by_surname().iter().map(|s| s.id.as_str()).collect();
    // Alvarez first, then the three (case-insensitively equal) Gomez entries
    // in insertion order.
    assert_eq!(ids, vec!["3", "1", "2", "4"]);
}

#[test]
fn test_binary_search_finds_every_present_surname() {
    let registry = sample_registry();
    let reports = Reports::new(&registry);

    for surname in ["Pérez", "González", "López"] {
        let found = reports.binary_search_by_surname(surname).unwrap();
        assert_eq!(found.surname, surname);
    }
    // Case-insensitive match.
    assert_eq!(reports.binary_search_by_surname("pérez").unwrap().id, "1");
    assert!(reports.binary_search_by_surname("Inexistente").is_none());
}

#[test]
fn test_binary_search_unaffected_by_unrelated_insertion() {
    let mut registry = sample_registry();
    {
        let reports = Reports::new(&registry);
        assert_eq!(reports.binary_search_by_surname("González").unwrap().id, "2");
    }

    registry
        .add_student(student("9", "999999", "Nuevo", "Zuluaga", "z@test.com"))
        .unwrap();

    let reports = Reports::new(&registry);
    assert_eq!(reports.binary_search_by_surname("González").unwrap().id, "2");
    assert_eq!(reports.binary_search_by_surname("Zuluaga").unwrap().id, "9");
}

#[test]
fn test_top_grades_for_course_scenario() {
    let registry = sample_registry();
    let reports = Reports::new(&registry);

    let top = reports.top_grades_for_course("MAT101", 3);
    let ranked: Vec<(&str, f64)> = top
        .iter()
        .map(|(s, g)| (s.given_names.as_str(), *g))
        .collect();
    assert_eq!(ranked, vec![("Juan", 4.5), ("María", 3.8), ("Ana", 2.1)]);
}

#[test]
fn test_top_grades_length_is_min_of_n_and_graded() {
    let registry = sample_registry();
    let reports = Reports::new(&registry);

    assert_eq!(reports.top_grades_for_course("MAT101", 2).len(), 2);
    assert_eq!(reports.top_grades_for_course("MAT101", 10).len(), 3);
    // FIS101 has one enrollment but no grade.
    assert!(reports.top_grades_for_course("FIS101", 3).is_empty());
    assert!(reports.top_grades_for_course("NOPE", 3).is_empty());
}

#[test]
fn test_failing_enrollments_scenario() {
    let registry = sample_registry();
    let reports = Reports::new(&registry);

    let failing = reports.failing_enrollments(3.0);
    assert_eq!(failing.len(), 1);
    let (student, course, grade) = failing[0];
    assert_eq!(student.given_names, "Ana");
    assert_eq!(course.code, "MAT101");
    assert_eq!(grade, 2.1);

    // The threshold comparison is strict.
    assert_eq!(reports.failing_enrollments(3.8).len(), 1);
    assert_eq!(reports.failing_enrollments(3.9).len(), 2);
}

#[test]
fn test_credit_load() {
    let registry = sample_registry();
    let reports = Reports::new(&registry);

    // Juan: MAT101 (3) + FIS101 (4); the ungraded enrollment still counts.
    assert_eq!(reports.credit_load("1"), 7);
    assert_eq!(reports.credit_load("2"), 3);
    assert_eq!(reports.credit_load("unknown"), 0);
}

#[test]
fn test_unique_email_domains() {
    let registry = sample_registry();
    let reports = Reports::new(&registry);
    assert_eq!(reports.unique_email_domains(), vec!["test.com"]);
}

#[test]
fn test_unique_email_domains_sorted_and_deduplicated() {
    let mut registry = Registry::new();
    registry
        .add_student(student("1", "111111", "A", "Uno", "a@zeta.org"))
        .unwrap();
    registry
        .add_student(student("2", "222222", "B", "Dos", "b@alpha.edu"))
        .unwrap();
    registry
        .add_student(student("3", "333333", "C", "Tres", "c@zeta.org"))
        .unwrap();

    let reports = Reports::new(&registry);
    assert_eq!(reports.unique_email_domains(), vec!["alpha.edu", "zeta.org"]);
}

#[test]
fn test_orphaned_enrollments_are_skipped() {
    // Rows loaded from disk may reference records that no longer exist; the
    // reports tolerate them instead of failing the query.
    let orphan = Enrollment {
        id: "e1".to_string(),
        student_id: "ghost".to_string(),
        course_code: "GONE101".to_string(),
        inscription_id: "i1".to_string(),
        enrolled_on: date(),
        grade: Some(1.0),
    };
    let known = student("1", "12345678", "Juan", "Pérez", "juan@test.com");
    let half_orphan = Enrollment {
        id: "e2".to_string(),
        student_id: "1".to_string(),
        course_code: "GONE101".to_string(),
        inscription_id: "i2".to_string(),
        enrolled_on: date(),
        grade: Some(1.5),
    };
    let registry = Registry::from_parts(
        vec![known],
        vec![course("MAT101", "Matemáticas", 3)],
        Vec::new(),
        vec![orphan, half_orphan],
    );

    let reports = Reports::new(&registry);
    assert!(reports.failing_enrollments(3.0).is_empty());
    assert!(reports.top_grades_for_course("GONE101", 3).is_empty());
    // Unresolved course codes contribute nothing to the credit load.
    assert_eq!(reports.credit_load("1"), 0);
}
