pub mod registry;
pub mod reports;

pub use crate::domain::model::Course;
#[cfg(feature = "inscriptions")]
pub use crate::domain::model::Inscription;
pub use crate::domain::model::{Enrollment, Student};
pub use crate::domain::ports::{ConfigProvider, Repository};
pub use crate::utils::error::Result;
