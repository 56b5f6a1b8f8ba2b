pub mod artifact;
pub mod settings;
pub mod snapshot;

pub use artifact::GeneratedArtifact;
pub use settings::{GenerationSettings, GenerationSettingsBuilder};
pub use snapshot::{DirectoryEntry, FileEntry, FileSystemSnapshot};
