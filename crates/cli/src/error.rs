use connectors::PushdownError;
use filter_syntax::MalformedExpression;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the configuration file: {0}")]
    ConfigFileRead(#[from] std::io::Error),

    #[error("Failed to deserialize the configuration file as JSON: {0}")]
    ConfigDeserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Failed to parse the filter: {0}")]
    Filter(#[from] MalformedExpression),

    #[error("Failed to compile the filter: {0}")]
    Pushdown(#[from] PushdownError),
}
