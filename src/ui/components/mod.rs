// UI Components
pub mod dialog;
pub mod directory_view;
pub mod path_view;
pub mod select_button;

pub use dialog::{PickerDialog, StatusMessage};
pub use directory_view::{DirectoryView, ViewEvent};
pub use path_view::PathView;
pub use select_button::SelectButton;
