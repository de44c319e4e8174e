use thiserror::Error;

/// Errors that stop a run before the child can be handed to the user.
#[derive(Debug, Error)]
pub enum AutorespondError {
    #[error("No command given")]
    MissingCommand,

    #[error("Failed to open pseudo-terminal: {0}")]
    OpenPty(#[source] anyhow::Error),

    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Pseudo-terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
