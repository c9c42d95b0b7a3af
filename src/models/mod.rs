// Data Models
pub mod log_view;
pub mod server_info;
pub mod text_field;
pub mod user_form;

pub use log_view::LogView;
pub use server_info::ServerInfo;
pub use text_field::TextField;
pub use user_form::{FormFocus, UserForm};
