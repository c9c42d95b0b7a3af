// UI Layer
pub mod components;
pub mod layout;
pub mod theme;

// Re-export layout types for convenience
pub use layout::{LayoutManager, LayoutMode};

// Re-export components
pub use components::{
    CommandBar, Dialog, DialogKind, InfoPanel, LogPanel, StatusBar, WarningScreen,
};
pub use theme::{Theme, ThemeManager};
