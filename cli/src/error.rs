use lending::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("not logged in; run `library-cli login` first")]
    NotLoggedIn,
    #[error("this command is for {required} accounts; you are signed in as {role}")]
    WrongSection { required: &'static str, role: &'static str },
    #[error("{0}")]
    Action(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no config directory; pass --state-file or set LIBRARY_STATE_FILE")]
    NoStateDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl CliError {
    /// Wrap a write failure with the message a person should see.
    pub fn action(err: &ApiError, fallback: &str) -> Self {
        Self::Action(err.user_message(fallback))
    }
}
