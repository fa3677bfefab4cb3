use thiserror::Error;

pub type Result<T> = std::result::Result<T, PackageError>;

/// Everything that can go wrong between parsing an identifier and printing a chart.
///
/// `InvalidIdentifier` is the only variant the CLI recovers from (it skips that
/// argument); every other variant ends the invocation.
#[derive(Error, Debug)]
pub enum PackageError {
    #[error(
        "No versions of \"{0}\" were found. Please try your search again. NOTE: Case matters."
    )]
    NotFound(String),
    #[error("Invalid name or URL: \"{0}\"")]
    InvalidIdentifier(String),
    #[error("Package has no releases")]
    NoReleases,
    #[error("invalid upload time {value:?} for release {version}")]
    DateParse {
        version: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("cannot average downloads over zero releases")]
    DivisionByZero,
    #[error("package \"{name}\" does not declare a {what}")]
    MissingUrl { name: String, what: &'static str },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request to {url} failed with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not launch browser: {0}")]
    Launch(#[from] std::io::Error),
}
