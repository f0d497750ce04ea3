use crate::core::registry::Registry;
#[cfg(feature = "inscriptions")]
use crate::domain::model::Inscription;
use crate::domain::model::{Course, Enrollment, Student};
use crate::domain::ports::Repository;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const STUDENTS_FILE: &str = "students.csv";
const COURSES_FILE: &str = "courses.csv";
#[cfg(feature = "inscriptions")]
const INSCRIPTIONS_FILE: &str = "inscriptions.csv";
const ENROLLMENTS_FILE: &str = "enrollments.csv";

/// Flat-file store: one delimited file per collection under a data directory.
/// Files that do not exist yet load as empty collections.
#[derive(Debug, Clone)]
pub struct CsvStore {
    data_dir: PathBuf,
    delimiter: u8,
}

impl CsvStore {
    pub fn new(data_dir: impl AsRef<Path>, delimiter: u8) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            delimiter,
        }
    }

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.data_dir.join(file);
        if !path.exists() {
            tracing::debug!(file, "no data file yet, starting empty");
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_path(&path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }

    fn write_collection<T: Serialize>(&self, file: &str, rows: &[T]) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(self.data_dir.join(file))?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Repository for CsvStore {
    fn load(&self) -> Result<Registry> {
        let students: Vec<Student> = self.read_collection(STUDENTS_FILE)?;
        let courses: Vec<Course> = self.read_collection(COURSES_FILE)?;
        #[cfg(feature = "inscriptions")]
        let inscriptions: Vec<Inscription> = self.read_collection(INSCRIPTIONS_FILE)?;
        let enrollments: Vec<Enrollment> = self.read_collection(ENROLLMENTS_FILE)?;

        tracing::info!(
            students = students.len(),
            courses = courses.len(),
            enrollments = enrollments.len(),
            "data loaded"
        );

        Ok(Registry::from_parts(
            students,
            courses,
            #[cfg(feature = "inscriptions")]
            inscriptions,
            enrollments,
        ))
    }

    fn save(&self, registry: &Registry) -> Result<()> {
        self.write_collection(STUDENTS_FILE, registry.students())?;
        self.write_collection(COURSES_FILE, registry.courses())?;
        #[cfg(feature = "inscriptions")]
        self.write_collection(INSCRIPTIONS_FILE, registry.inscriptions())?;
        self.write_collection(ENROLLMENTS_FILE, registry.enrollments())?;

        tracing::info!("data saved");
        Ok(())
    }

    fn export_json(&self, registry: &Registry) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;

        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = self.data_dir.join(format!("siga_export_{stamp}.json"));
        let json = serde_json::to_string_pretty(registry)?;
        fs::write(&path, json)?;

        tracing::info!(path = %path.display(), "JSON export written");
        Ok(path)
    }
}
