use behave_core::{ConfigError, Page, RequestError, ResultsError};
use colored::*;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<Page> for FormattedString {
    fn from(Page { number, records }: Page) -> Self {
        let header = format!("Page {number} ({} records)", records.len());
        let body = serde_json::Value::Array(records.into_iter().map(Into::into).collect());
        let FormattedString(body) = FormattedString::from(body);
        FormattedString(format!("{}\n{}", header.cyan().bold(), body))
    }
}

impl From<RequestError> for FormattedString {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Api(api) => FormattedString(format!(
                "{} status={} message={:?}",
                "Behave API Failed:".red().bold(),
                api.status,
                api.message
            )),
            err => FormattedString(format!("{}\n\n'{}'", "Call Failed:".red().bold(), err)),
        }
    }
}

impl From<ResultsError> for FormattedString {
    fn from(err: ResultsError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Invalid Query:".red().bold(), err))
    }
}

impl From<ConfigError> for FormattedString {
    fn from(err: ConfigError) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Configuration Error:".red().bold(),
            err
        ))
    }
}

impl From<std::io::Error> for FormattedString {
    fn from(err: std::io::Error) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Failed to write output:".red().bold(),
            err
        ))
    }
}
