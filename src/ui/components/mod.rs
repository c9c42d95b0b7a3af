// UI Components
pub mod command_bar;
pub mod dialog;
pub mod info_panel;
pub mod log_panel;
pub mod status_bar;
pub mod warning;

// Re-export components for convenience
pub use command_bar::CommandBar;
pub use dialog::{Dialog, DialogKind};
pub use info_panel::InfoPanel;
pub use log_panel::LogPanel;
pub use status_bar::StatusBar;
pub use warning::WarningScreen;
