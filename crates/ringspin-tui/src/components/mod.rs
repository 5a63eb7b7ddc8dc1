pub mod help_popup;
pub mod log_panel;
pub mod popup;
pub mod spinner_panel;
pub mod status_bar;
