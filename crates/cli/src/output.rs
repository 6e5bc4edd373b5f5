use crate::error::CliError;

const NO_PUSHDOWN: &str = "no pushdown";

/// Writes a result to `path`, or to stdout when no path is given.
pub async fn emit(result: Option<String>, path: Option<String>) -> Result<(), CliError> {
    let text = result.unwrap_or_else(|| NO_PUSHDOWN.to_string());
    match path {
        Some(path) => tokio::fs::write(path, format!("{text}\n")).await?,
        None => println!("{text}"),
    }
    Ok(())
}
