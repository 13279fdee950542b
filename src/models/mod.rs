// Data Models
pub mod file_entry;
pub mod host;
pub mod path_state;

pub use file_entry::{DirectoryListing, FileEntry, FileKind, FileSubtype};
pub use host::{HostModel, SessionModel};
pub use path_state::PathState;
