pub(super) mod dialog_controller;
pub mod input_controller;
