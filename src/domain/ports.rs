use crate::core::registry::Registry;
use crate::utils::error::Result;
use std::path::PathBuf;

pub trait ConfigProvider {
    fn data_dir(&self) -> &str;
    fn delimiter(&self) -> u8;
    fn passing_threshold(&self) -> f64;
    fn top_n(&self) -> usize;
}

/// Seam between the in-memory registry and whatever medium holds it between
/// sessions. Loading never fails on a missing file: a first run starts empty.
pub trait Repository {
    fn load(&self) -> Result<Registry>;
    fn save(&self, registry: &Registry) -> Result<()>;
    fn export_json(&self, registry: &Registry) -> Result<PathBuf>;
}
