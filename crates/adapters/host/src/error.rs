//! Host adapter error types.

use wvadmin_domain::error::AdminError;

/// Errors specific to the host adapter.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A file could not be read or written.
    #[error("cannot access {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A configured command is empty.
    #[error("no command configured for {purpose}")]
    NoCommand { purpose: &'static str },

    /// A command could not be spawned.
    #[error("cannot run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A command exited unsuccessfully.
    #[error("{program} exited with {status}")]
    CommandFailed { program: String, status: String },
}

impl From<HostError> for AdminError {
    fn from(err: HostError) -> Self {
        Self::Host(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_to_host_error() {
        let err: AdminError = HostError::NoCommand { purpose: "start" }.into();
        assert!(matches!(err, AdminError::Host(_)));
    }

    #[test]
    fn should_display_failed_command() {
        let err = HostError::CommandFailed {
            program: "sudo".to_string(),
            status: "exit status: 1".to_string(),
        };
        assert_eq!(err.to_string(), "sudo exited with exit status: 1");
    }
}
