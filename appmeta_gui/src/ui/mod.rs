pub mod connection;
pub mod dialog;
pub mod preset_tab;
