// System Layer
pub mod backend;
pub mod channel;
pub mod filesystem;
pub mod protocol;

pub use backend::BackendWorker;
pub use channel::Transport;
