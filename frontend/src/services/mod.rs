pub mod api;
pub mod availability;
pub mod date_utils;
pub mod dom;
pub mod logging;
pub mod toast;
