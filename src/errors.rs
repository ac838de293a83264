use crate::config::ConfigError;

/// Errors raised while resolving the native window handle of a host widget.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("host widget has no native handle")]
    NoHandle,

    #[error("host widget could not be realized")]
    NotRealized,

    #[error("windowing system returned no drawable for the host widget")]
    NoDrawable,

    #[error("unsupported window handle: {0}")]
    Unsupported(String),
}

impl ResolveError {
    /// Message shown to the user through the host's blocking notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            ResolveError::NoDrawable => "Could not get window ID",
            _ => "Could not get window handle",
        }
    }
}

/// Errors that make a bridge unusable. These only happen while setting the bridge up.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("cannot resolve native window handle: {0}")]
    Resolve(#[from] ResolveError),

    #[error("can't create render device")]
    EngineCreation(#[source] anyhow::Error),

    #[error("render engine is already initialized")]
    AlreadyInitialized,

    #[error("bridge has been shut down")]
    ShutDown,

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
