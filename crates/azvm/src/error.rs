#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing env var: {0}")]
    MissingEnv(String),

    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("no subscriptions are visible to the configured credential")]
    NoSubscription,

    #[error("failed to read password: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Azure(#[from] azure_api::Error),

    #[error("{0}")]
    Infra(#[from] azvm_infra::Error),

    /// A create was rejected and the diagnoser explained why.
    #[error("{0}")]
    Conflict(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
