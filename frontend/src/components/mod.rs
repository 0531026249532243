pub mod availability_manager;
pub mod calendar_preview;
pub mod date_picker;
pub mod multi_date_picker;
pub mod range_picker;
