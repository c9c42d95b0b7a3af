use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to run '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' failed:\n{output}")]
    CommandFailed { command: String, output: String },

    #[error("Please fill in all fields.")]
    MissingInput,

    #[error("Invalid username '{0}': must not be empty, start with '-', or contain ':' or whitespace.")]
    InvalidUsername(String),

    #[error("User '{0}' already exists.")]
    UserExists(String),

    #[error("Could not create shared folder {path}: {source}")]
    SharedFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor error: {0}")]
    Editor(String),
}

pub type Result<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_keeps_output_verbatim() {
        let err = PanelError::CommandFailed {
            command: "pkexec systemctl start proftpd".to_string(),
            output: "Job for proftpd.service failed.\n".to_string(),
        };
        let text = err.to_string();
        assert!(text.starts_with("'pkexec systemctl start proftpd' failed:"));
        assert!(text.contains("Job for proftpd.service failed."));
    }

    #[test]
    fn test_user_exists_message() {
        assert_eq!(
            PanelError::UserExists("alice".to_string()).to_string(),
            "User 'alice' already exists."
        );
    }
}
