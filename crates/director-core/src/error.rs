use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectorError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("no tokio runtime: the progress timer must be started inside a runtime")]
    NoRuntime,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DirectorError>;
