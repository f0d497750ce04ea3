use crate::core::registry::{short_id, Registry};
use crate::core::reports::Reports;
use crate::domain::model::{Course, Student};
use crate::domain::ports::{ConfigProvider, Repository};
use crate::utils::error::Result;
use crate::utils::validation::{self, StudentForm};
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Text-menu front end. Owns the registry for the session; the repository is
/// only touched to save on exit and for JSON export.
///
/// Input comes from any `BufRead` source so the loop can be driven in tests;
/// [`Console::new`] wires it to stdin. An interrupt flag (set from a signal
/// handler) is checked between menu interactions and triggers the same
/// best-effort save-and-exit as the quit option.
pub struct Console<R: Repository, C: ConfigProvider> {
    registry: Registry,
    repository: R,
    config: C,
    input: Box<dyn BufRead>,
    interrupted: Arc<AtomicBool>,
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

impl<R: Repository, C: ConfigProvider> Console<R, C> {
    pub fn new(registry: Registry, repository: R, config: C) -> Self {
        Self::with_input(registry, repository, config, Box::new(io::stdin().lock()))
    }

    pub fn with_input(
        registry: Registry,
        repository: R,
        config: C,
        input: Box<dyn BufRead>,
    ) -> Self {
        Self {
            registry,
            repository,
            config,
            input,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag for a signal handler; once set, the console saves and
    /// exits as soon as the current interaction returns.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    fn interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Reads one trimmed line. `Ok(None)` means EOF (Ctrl-D), which callers
    /// treat as "cancel" or, at the top level, as "save and quit".
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label}");
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn select_index(&mut self, len: usize) -> Result<Option<usize>> {
        let Some(raw) = self.prompt("Select (number): ")? else {
            return Ok(None);
        };
        match raw.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => Ok(Some(n - 1)),
            _ => {
                println!("Invalid selection");
                Ok(None)
            }
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            if self.interrupted() {
                println!("\nInterrupted, saving...");
                break;
            }

            println!("\n{}", "=".repeat(50));
            println!("           MINISIGA - ACADEMIC RECORDS");
            println!("{}", "=".repeat(50));
            println!("1. Students");
            println!("2. Courses");
            println!("3. Enrollments");
            println!("4. Reports");
            println!("5. Export JSON");
            println!("0. Quit");
            println!("{}", "=".repeat(50));

            let option = match self.prompt("Select an option: ") {
                Ok(Some(option)) => option,
                Ok(None) => break,
                // A dead input stream cannot recover; save what we have.
                Err(e) => {
                    eprintln!("Input error: {e}");
                    break;
                }
            };

            let outcome = match option.as_str() {
                "0" => break,
                "1" => self.students_menu(),
                "2" => self.courses_menu(),
                "3" => self.enrollments_menu(),
                "4" => self.reports_menu(),
                "5" => {
                    self.export_json();
                    Ok(())
                }
                _ => {
                    println!("Invalid option");
                    Ok(())
                }
            };
            // The registry is untouched by a failed interaction; keep the
            // session alive and let the operator retry.
            if let Err(e) = outcome {
                println!("Unexpected error: {e}");
                tracing::warn!("menu operation failed: {e}");
            }
        }

        println!("Saving data...");
        self.repository.save(&self.registry)?;
        println!("Goodbye!");
        Ok(())
    }

    // ---- students ----

    fn students_menu(&mut self) -> Result<()> {
        loop {
            if self.interrupted() {
                return Ok(());
            }
            println!("\n--- STUDENTS ---");
            println!("1. Create student");
            println!("2. Edit student");
            println!("3. Delete student");
            println!("4. List students");
            println!("0. Back");

            let Some(option) = self.prompt("Select an option: ")? else {
                return Ok(());
            };
            match option.as_str() {
                "0" => return Ok(()),
                "1" => self.create_student()?,
                "2" => self.edit_student()?,
                "3" => self.delete_student()?,
                "4" => self.list_students(),
                _ => println!("Invalid option"),
            }
        }
    }

    fn create_student(&mut self) -> Result<()> {
        println!("\n--- NEW STUDENT ---");
        let mut form = StudentForm::default();
        let Some(document) = self.prompt("Document: ")? else {
            return Ok(());
        };
        form.document = document;
        let Some(given_names) = self.prompt("Given names: ")? else {
            return Ok(());
        };
        form.given_names = given_names;
        let Some(surname) = self.prompt("Surname: ")? else {
            return Ok(());
        };
        form.surname = surname;
        let Some(email) = self.prompt("Email: ")? else {
            return Ok(());
        };
        form.email = email;
        let Some(birth_date) = self.prompt("Birth date (YYYY-MM-DD): ")? else {
            return Ok(());
        };
        form.birth_date = birth_date;

        let errors = validation::validate_student_form(&form);
        if !errors.is_empty() {
            println!("\nValidation errors:");
            for error in &errors {
                println!("  - {error}");
            }
            return Ok(());
        }
        let Some(birth_date) = validation::parse_date(&form.birth_date) else {
            return Ok(());
        };

        let student = Student {
            id: short_id(),
            document: form.document,
            given_names: form.given_names,
            surname: form.surname,
            email: form.email,
            birth_date,
        };
        let id = student.id.clone();
        match self.registry.add_student(student) {
            Ok(()) => println!("Student created with id {id}"),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    fn edit_student(&mut self) -> Result<()> {
        let Some(current) = self.pick_student()? else {
            return Ok(());
        };

        println!("Leave a field blank to keep the current value.");
        let mut updated = current;
        if let Some(value) = self.prompt(&format!("Document [{}]: ", updated.document))? {
            if !value.is_empty() {
                if !validation::is_valid_document(&value) {
                    println!("Document must contain only digits and have 6-15 characters");
                    return Ok(());
                }
                updated.document = value;
            }
        } else {
            return Ok(());
        }
        if let Some(value) = self.prompt(&format!("Given names [{}]: ", updated.given_names))? {
            if !value.is_empty() {
                updated.given_names = value;
            }
        } else {
            return Ok(());
        }
        if let Some(value) = self.prompt(&format!("Surname [{}]: ", updated.surname))? {
            if !value.is_empty() {
                updated.surname = value;
            }
        } else {
            return Ok(());
        }
        if let Some(value) = self.prompt(&format!("Email [{}]: ", updated.email))? {
            if !value.is_empty() {
                if !validation::is_valid_email(&value) {
                    println!("Email format is not valid");
                    return Ok(());
                }
                updated.email = value;
            }
        } else {
            return Ok(());
        }
        if let Some(value) = self.prompt(&format!("Birth date [{}]: ", updated.birth_date))? {
            if !value.is_empty() {
                match validation::parse_date(&value) {
                    Some(date) => updated.birth_date = date,
                    None => {
                        println!("Birth date must be a valid YYYY-MM-DD date");
                        return Ok(());
                    }
                }
            }
        } else {
            return Ok(());
        }

        match self.registry.update_student(updated) {
            Ok(()) => println!("Student updated"),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    fn delete_student(&mut self) -> Result<()> {
        let Some(student) = self.pick_student()? else {
            return Ok(());
        };

        match self.registry.remove_student(&student.id, false) {
            Ok(_) => {
                println!("Student {} removed", student.full_name());
                return Ok(());
            }
            Err(crate::utils::error::SigaError::HasDependentsError {
                inscriptions,
                enrollments,
                ..
            }) => {
                println!(
                    "{} still has {inscriptions} inscription(s) and {enrollments} enrollment(s).",
                    student.full_name()
                );
                let Some(answer) = self.prompt("Delete them as well? (y/N): ")? else {
                    return Ok(());
                };
                if !answer.eq_ignore_ascii_case("y") {
                    println!("Nothing deleted");
                    return Ok(());
                }
            }
            Err(e) => {
                println!("Declined: {e}");
                return Ok(());
            }
        }

        match self.registry.remove_student(&student.id, true) {
            Ok(report) => println!(
                "Removed student plus {} inscription(s) and {} enrollment(s)",
                report.inscriptions, report.enrollments
            ),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    fn list_students(&self) {
        let students = self.registry.students();
        if students.is_empty() {
            println!("No students registered.");
            return;
        }

        println!("\n--- STUDENTS ({}) ---", students.len());
        println!(
            "{:<10} {:<16} {:<20} {:<20} {:<25}",
            "Id", "Document", "Given names", "Surname", "Email"
        );
        println!("{}", "-".repeat(93));
        for s in students {
            println!(
                "{:<10} {:<16} {:<20} {:<20} {:<25}",
                s.id, s.document, s.given_names, s.surname, s.email
            );
        }
    }

    fn pick_student(&mut self) -> Result<Option<Student>> {
        let students = self.registry.students().to_vec();
        if students.is_empty() {
            println!("No students registered.");
            return Ok(None);
        }

        println!("\nStudents:");
        for (i, s) in students.iter().enumerate() {
            println!("{}. {} - {}", i + 1, s.document, s.full_name());
        }
        Ok(self
            .select_index(students.len())?
            .map(|i| students[i].clone()))
    }

    // ---- courses ----

    fn courses_menu(&mut self) -> Result<()> {
        loop {
            if self.interrupted() {
                return Ok(());
            }
            println!("\n--- COURSES ---");
            println!("1. Create course");
            println!("2. Edit course");
            println!("3. Rename course code");
            println!("4. Delete course");
            println!("5. List courses");
            println!("0. Back");

            let Some(option) = self.prompt("Select an option: ")? else {
                return Ok(());
            };
            match option.as_str() {
                "0" => return Ok(()),
                "1" => self.create_course()?,
                "2" => self.edit_course()?,
                "3" => self.rename_course()?,
                "4" => self.delete_course()?,
                "5" => self.list_courses(),
                _ => println!("Invalid option"),
            }
        }
    }

    fn create_course(&mut self) -> Result<()> {
        println!("\n--- NEW COURSE ---");
        let Some(code) = self.prompt("Course code: ")? else {
            return Ok(());
        };
        let code = code.to_uppercase();
        let Some(name) = self.prompt("Course name: ")? else {
            return Ok(());
        };
        let Some(credits_raw) = self.prompt("Credits (1-10): ")? else {
            return Ok(());
        };
        let Some(instructor) = self.prompt("Instructor: ")? else {
            return Ok(());
        };

        let Ok(credits) = credits_raw.parse::<u8>() else {
            println!("Credits must be an integer");
            return Ok(());
        };
        if !validation::is_valid_credits(credits) {
            println!("Credits must be between 1 and 10");
            return Ok(());
        }

        match self.registry.add_course(Course {
            code: code.clone(),
            name,
            credits,
            instructor,
        }) {
            Ok(()) => println!("Course created with code {code}"),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    fn edit_course(&mut self) -> Result<()> {
        let Some(current) = self.pick_course()? else {
            return Ok(());
        };

        println!("Leave a field blank to keep the current value.");
        let mut updated = current;
        if let Some(value) = self.prompt(&format!("Name [{}]: ", updated.name))? {
            if !value.is_empty() {
                updated.name = value;
            }
        } else {
            return Ok(());
        }
        if let Some(value) = self.prompt(&format!("Credits [{}]: ", updated.credits))? {
            if !value.is_empty() {
                match value.parse::<u8>() {
                    Ok(credits) if validation::is_valid_credits(credits) => {
                        updated.credits = credits;
                    }
                    _ => {
                        println!("Credits must be an integer between 1 and 10");
                        return Ok(());
                    }
                }
            }
        } else {
            return Ok(());
        }
        if let Some(value) = self.prompt(&format!("Instructor [{}]: ", updated.instructor))? {
            if !value.is_empty() {
                updated.instructor = value;
            }
        } else {
            return Ok(());
        }

        match self.registry.update_course(updated) {
            Ok(()) => println!("Course updated"),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    fn rename_course(&mut self) -> Result<()> {
        let Some(course) = self.pick_course()? else {
            return Ok(());
        };
        let Some(new_code) = self.prompt("New course code: ")? else {
            return Ok(());
        };
        let new_code = new_code.to_uppercase();

        match self.registry.rename_course(&course.code, &new_code) {
            Ok(report) => println!(
                "Course renamed; updated {} inscription(s) and {} enrollment(s)",
                report.inscriptions, report.enrollments
            ),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    fn delete_course(&mut self) -> Result<()> {
        let Some(course) = self.pick_course()? else {
            return Ok(());
        };

        match self.registry.remove_course(&course.code, false) {
            Ok(_) => {
                println!("Course {} removed", course.code);
                return Ok(());
            }
            Err(crate::utils::error::SigaError::HasDependentsError {
                inscriptions,
                enrollments,
                ..
            }) => {
                println!(
                    "{} still has {inscriptions} inscription(s) and {enrollments} enrollment(s).",
                    course.code
                );
                let Some(answer) = self.prompt("Delete them as well? (y/N): ")? else {
                    return Ok(());
                };
                if !answer.eq_ignore_ascii_case("y") {
                    println!("Nothing deleted");
                    return Ok(());
                }
            }
            Err(e) => {
                println!("Declined: {e}");
                return Ok(());
            }
        }

        match self.registry.remove_course(&course.code, true) {
            Ok(report) => println!(
                "Removed course plus {} inscription(s) and {} enrollment(s)",
                report.inscriptions, report.enrollments
            ),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    fn list_courses(&self) {
        let courses = self.registry.courses();
        if courses.is_empty() {
            println!("No courses registered.");
            return;
        }

        println!("\n--- COURSES ({}) ---", courses.len());
        println!(
            "{:<10} {:<30} {:<8} {:<25}",
            "Code", "Name", "Credits", "Instructor"
        );
        println!("{}", "-".repeat(75));
        for c in courses {
            println!(
                "{:<10} {:<30} {:<8} {:<25}",
                c.code, c.name, c.credits, c.instructor
            );
        }
    }

    fn pick_course(&mut self) -> Result<Option<Course>> {
        let courses = self.registry.courses().to_vec();
        if courses.is_empty() {
            println!("No courses registered.");
            return Ok(None);
        }

        println!("\nCourses:");
        for (i, c) in courses.iter().enumerate() {
            println!("{}. {} - {} ({} credits)", i + 1, c.code, c.name, c.credits);
        }
        Ok(self
            .select_index(courses.len())?
            .map(|i| courses[i].clone()))
    }

    // ---- enrollments ----

    #[cfg(feature = "inscriptions")]
    fn enrollments_menu(&mut self) -> Result<()> {
        loop {
            if self.interrupted() {
                return Ok(());
            }
            println!("\n--- ENROLLMENTS ---");
            println!("1. Inscribe student in course");
            println!("2. Matriculate an inscription");
            println!("3. Assign grade");
            println!("4. Delete inscription");
            println!("5. Delete enrollment");
            println!("6. List inscriptions");
            println!("7. List enrollments");
            println!("0. Back");

            let Some(option) = self.prompt("Select an option: ")? else {
                return Ok(());
            };
            match option.as_str() {
                "0" => return Ok(()),
                "1" => self.create_inscription()?,
                "2" => self.matriculate()?,
                "3" => self.assign_grade()?,
                "4" => self.delete_inscription()?,
                "5" => self.delete_enrollment()?,
                "6" => self.list_inscriptions(),
                "7" => self.list_enrollments(),
                _ => println!("Invalid option"),
            }
        }
    }

    #[cfg(not(feature = "inscriptions"))]
    fn enrollments_menu(&mut self) -> Result<()> {
        loop {
            if self.interrupted() {
                return Ok(());
            }
            println!("\n--- ENROLLMENTS ---");
            println!("1. Enroll student in course");
            println!("2. Assign grade");
            println!("3. Delete enrollment");
            println!("4. List enrollments");
            println!("0. Back");

            let Some(option) = self.prompt("Select an option: ")? else {
                return Ok(());
            };
            match option.as_str() {
                "0" => return Ok(()),
                "1" => self.create_enrollment()?,
                "2" => self.assign_grade()?,
                "3" => self.delete_enrollment()?,
                "4" => self.list_enrollments(),
                _ => println!("Invalid option"),
            }
        }
    }

    #[cfg(feature = "inscriptions")]
    fn create_inscription(&mut self) -> Result<()> {
        let Some(student) = self.pick_student()? else {
            return Ok(());
        };
        let Some(course) = self.pick_course()? else {
            return Ok(());
        };

        match self.registry.inscribe(&student.id, &course.code, today()) {
            Ok(id) => println!(
                "Inscription {id} created: {} -> {}",
                student.full_name(),
                course.code
            ),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    #[cfg(feature = "inscriptions")]
    fn matriculate(&mut self) -> Result<()> {
        // Inscriptions not yet converted to an enrollment.
        let pending: Vec<(String, String)> = {
            let reports = Reports::new(&self.registry);
            self.registry
                .inscriptions()
                .iter()
                .filter(|i| {
                    !self
                        .registry
                        .enrollments()
                        .iter()
                        .any(|e| e.inscription_id == i.id)
                })
                .map(|i| {
                    let who = reports
                        .find_student_by_id(&i.student_id)
                        .map_or_else(|| "N/A".to_string(), Student::full_name);
                    (i.id.clone(), format!("{who} - {}", i.course_code))
                })
                .collect()
        };

        if pending.is_empty() {
            println!("No inscriptions awaiting matriculation.");
            return Ok(());
        }

        println!("\nInscriptions awaiting matriculation:");
        for (i, (id, label)) in pending.iter().enumerate() {
            println!("{}. {label} (id: {id})", i + 1);
        }
        let Some(index) = self.select_index(pending.len())? else {
            return Ok(());
        };

        match self.registry.matriculate(&pending[index].0, today()) {
            Ok(id) => println!("Enrollment {id} created"),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    #[cfg(not(feature = "inscriptions"))]
    fn create_enrollment(&mut self) -> Result<()> {
        let Some(student) = self.pick_student()? else {
            return Ok(());
        };
        let Some(course) = self.pick_course()? else {
            return Ok(());
        };

        match self.registry.enroll(&student.id, &course.code, today()) {
            Ok(id) => println!(
                "Enrollment {id} created: {} -> {}",
                student.full_name(),
                course.code
            ),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    fn assign_grade(&mut self) -> Result<()> {
        let ungraded: Vec<(String, String)> = {
            let reports = Reports::new(&self.registry);
            self.registry
                .enrollments()
                .iter()
                .filter(|e| e.grade.is_none())
                .map(|e| {
                    let who = reports
                        .find_student_by_id(&e.student_id)
                        .map_or_else(|| "N/A".to_string(), Student::full_name);
                    (e.id.clone(), format!("{who} - {}", e.course_code))
                })
                .collect()
        };

        if ungraded.is_empty() {
            println!("No enrollments awaiting a grade.");
            return Ok(());
        }

        println!("\nEnrollments awaiting a grade:");
        for (i, (id, label)) in ungraded.iter().enumerate() {
            println!("{}. {label} (id: {id})", i + 1);
        }
        let Some(index) = self.select_index(ungraded.len())? else {
            return Ok(());
        };
        let Some(grade_raw) = self.prompt("Grade (0.0 - 5.0): ")? else {
            return Ok(());
        };
        let Ok(grade) = grade_raw.parse::<f64>() else {
            println!("Grade must be a number");
            return Ok(());
        };

        match self.registry.assign_grade(&ungraded[index].0, grade) {
            Ok(()) => println!("Grade {grade:.1} assigned"),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    #[cfg(feature = "inscriptions")]
    fn delete_inscription(&mut self) -> Result<()> {
        let inscriptions: Vec<(String, String)> = self
            .registry
            .inscriptions()
            .iter()
            .map(|i| {
                (
                    i.id.clone(),
                    format!("{} -> {} ({})", i.student_id, i.course_code, i.inscribed_on),
                )
            })
            .collect();
        if inscriptions.is_empty() {
            println!("No inscriptions registered.");
            return Ok(());
        }

        println!("\nInscriptions:");
        for (i, (id, label)) in inscriptions.iter().enumerate() {
            println!("{}. {label} (id: {id})", i + 1);
        }
        let Some(index) = self.select_index(inscriptions.len())? else {
            return Ok(());
        };

        match self.registry.remove_inscription(&inscriptions[index].0) {
            Ok(report) => println!(
                "Inscription removed together with {} enrollment(s)",
                report.enrollments
            ),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    fn delete_enrollment(&mut self) -> Result<()> {
        let enrollments: Vec<(String, String)> = self
            .registry
            .enrollments()
            .iter()
            .map(|e| {
                (
                    e.id.clone(),
                    format!("{} -> {} ({})", e.student_id, e.course_code, e.enrolled_on),
                )
            })
            .collect();
        if enrollments.is_empty() {
            println!("No enrollments registered.");
            return Ok(());
        }

        println!("\nEnrollments:");
        for (i, (id, label)) in enrollments.iter().enumerate() {
            println!("{}. {label} (id: {id})", i + 1);
        }
        let Some(index) = self.select_index(enrollments.len())? else {
            return Ok(());
        };

        match self.registry.remove_enrollment(&enrollments[index].0) {
            Ok(()) => println!("Enrollment removed"),
            Err(e) => println!("Declined: {e}"),
        }
        Ok(())
    }

    #[cfg(feature = "inscriptions")]
    fn list_inscriptions(&self) {
        let inscriptions = self.registry.inscriptions();
        if inscriptions.is_empty() {
            println!("No inscriptions registered.");
            return;
        }

        let reports = Reports::new(&self.registry);
        println!("\n--- INSCRIPTIONS ({}) ---", inscriptions.len());
        println!("{:<10} {:<25} {:<12} {:<12}", "Id", "Student", "Course", "Date");
        println!("{}", "-".repeat(61));
        for i in inscriptions {
            let who = reports
                .find_student_by_id(&i.student_id)
                .map_or_else(|| "N/A".to_string(), Student::full_name);
            println!(
                "{:<10} {:<25} {:<12} {:<12}",
                i.id,
                who,
                i.course_code,
                i.inscribed_on.to_string()
            );
        }
    }

    fn list_enrollments(&self) {
        let enrollments = self.registry.enrollments();
        if enrollments.is_empty() {
            println!("No enrollments registered.");
            return;
        }

        let reports = Reports::new(&self.registry);
        println!("\n--- ENROLLMENTS ({}) ---", enrollments.len());
        println!(
            "{:<10} {:<25} {:<12} {:<12} {:<6}",
            "Id", "Student", "Course", "Date", "Grade"
        );
        println!("{}", "-".repeat(68));
        for e in enrollments {
            let who = reports
                .find_student_by_id(&e.student_id)
                .map_or_else(|| "N/A".to_string(), Student::full_name);
            let grade = e.grade.map_or_else(|| "---".to_string(), |g| format!("{g:.1}"));
            println!(
                "{:<10} {:<25} {:<12} {:<12} {:<6}",
                e.id,
                who,
                e.course_code,
                e.enrolled_on.to_string(),
                grade
            );
        }
    }

    // ---- reports ----

    fn reports_menu(&mut self) -> Result<()> {
        loop {
            if self.interrupted() {
                return Ok(());
            }
            println!("\n--- REPORTS ---");
            println!("1. Find student by document");
            println!("2. Find student by email");
            println!("3. Students ordered by surname");
            println!("4. Top grades per course");
            println!("5. Failing students");
            println!("6. Credit load per student");
            println!("7. Unique email domains");
            println!("8. Binary search by surname");
            println!("0. Back");

            let Some(option) = self.prompt("Select an option: ")? else {
                return Ok(());
            };
            match option.as_str() {
                "0" => return Ok(()),
                "1" => self.report_find_by_document()?,
                "2" => self.report_find_by_email()?,
                "3" => self.report_students_by_surname(),
                "4" => self.report_top_grades()?,
                "5" => self.report_failing(),
                "6" => self.report_credit_load()?,
                "7" => self.report_email_domains(),
                "8" => self.report_binary_search()?,
                _ => println!("Invalid option"),
            }
        }
    }

    fn print_student(student: &Student) {
        println!("  Id: {}", student.id);
        println!("  Document: {}", student.document);
        println!("  Name: {}", student.full_name());
        println!("  Email: {}", student.email);
        println!("  Birth date: {}", student.birth_date);
    }

    fn report_find_by_document(&mut self) -> Result<()> {
        let Some(document) = self.prompt("Document to find: ")? else {
            return Ok(());
        };
        let reports = Reports::new(&self.registry);
        match reports.find_student_by_document(&document) {
            Some(student) => {
                println!("\nStudent found:");
                Self::print_student(student);
            }
            None => println!("No student with document {document}"),
        }
        Ok(())
    }

    fn report_find_by_email(&mut self) -> Result<()> {
        let Some(email) = self.prompt("Email to find: ")? else {
            return Ok(());
        };
        let reports = Reports::new(&self.registry);
        match reports.find_student_by_email(&email) {
            Some(student) => {
                println!("\nStudent found:");
                Self::print_student(student);
            }
            None => println!("No student with email {email}"),
        }
        Ok(())
    }

    fn report_students_by_surname(&self) {
        let reports = Reports::new(&self.registry);
        let sorted = reports.students_by_surname();
        if sorted.is_empty() {
            println!("No students registered.");
            return;
        }

        println!("\n--- STUDENTS BY SURNAME ({}) ---", sorted.len());
        println!(
            "{:<20} {:<20} {:<16} {:<25}",
            "Surname", "Given names", "Document", "Email"
        );
        println!("{}", "-".repeat(83));
        for s in sorted {
            println!(
                "{:<20} {:<20} {:<16} {:<25}",
                s.surname, s.given_names, s.document, s.email
            );
        }
    }

    fn report_top_grades(&mut self) -> Result<()> {
        let Some(course) = self.pick_course()? else {
            return Ok(());
        };
        let reports = Reports::new(&self.registry);
        let top = reports.top_grades_for_course(&course.code, self.config.top_n());
        if top.is_empty() {
            println!("No grades recorded for course {}", course.code);
            return Ok(());
        }

        println!("\n--- TOP {} GRADES - {} ---", self.config.top_n(), course.name);
        for (position, (student, grade)) in top.iter().enumerate() {
            println!("{}. {:<25} {grade:.1}", position + 1, student.full_name());
        }
        Ok(())
    }

    fn report_failing(&self) {
        let threshold = self.config.passing_threshold();
        let reports = Reports::new(&self.registry);
        let failing = reports.failing_enrollments(threshold);
        if failing.is_empty() {
            println!("No failing students (grade < {threshold:.1})");
            return;
        }

        println!("\n--- FAILING STUDENTS ({}) ---", failing.len());
        println!("{:<25} {:<12} {:<6}", "Student", "Course", "Grade");
        println!("{}", "-".repeat(45));
        for (student, course, grade) in failing {
            println!("{:<25} {:<12} {grade:.1}", student.full_name(), course.code);
        }
    }

    fn report_credit_load(&mut self) -> Result<()> {
        let Some(student) = self.pick_student()? else {
            return Ok(());
        };
        let reports = Reports::new(&self.registry);
        let credits = reports.credit_load(&student.id);
        println!("\nStudent: {}", student.full_name());
        println!("Total enrolled credits: {credits}");
        Ok(())
    }

    fn report_email_domains(&self) {
        let reports = Reports::new(&self.registry);
        let domains = reports.unique_email_domains();
        if domains.is_empty() {
            println!("No email domains registered.");
            return;
        }

        println!("\n--- UNIQUE EMAIL DOMAINS ({}) ---", domains.len());
        for (i, domain) in domains.iter().enumerate() {
            println!("{}. {domain}", i + 1);
        }
    }

    fn report_binary_search(&mut self) -> Result<()> {
        let Some(surname) = self.prompt("Surname to find: ")? else {
            return Ok(());
        };
        let reports = Reports::new(&self.registry);
        match reports.binary_search_by_surname(&surname) {
            Some(student) => {
                println!("\nStudent found (binary search):");
                Self::print_student(student);
            }
            None => println!("No student with surname {surname}"),
        }
        Ok(())
    }

    fn export_json(&self) {
        match self.repository.export_json(&self.registry) {
            Ok(path) => println!("Data exported to {}", path.display()),
            Err(e) => println!("Export failed: {e}"),
        }
    }
}
