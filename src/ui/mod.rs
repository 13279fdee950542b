// UI Layer
pub mod components;
pub mod layout;

pub use layout::DialogZone;

pub use components::{
    DirectoryView, PathView, PickerDialog, SelectButton, StatusMessage, ViewEvent,
};
