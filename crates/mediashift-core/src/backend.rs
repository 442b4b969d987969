use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Upload client backend types
///
/// This enum defines the available upload backends. It's defined in core
/// because it's used by both configuration and the client factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientBackend {
    /// Upload over HTTP to a media-hosting API
    Http,
    /// Copy into a local directory (dry runs, tests)
    Local,
}

impl FromStr for ClientBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(ClientBackend::Http),
            "local" => Ok(ClientBackend::Local),
            _ => Err(anyhow::anyhow!("Invalid client backend: {}", s)),
        }
    }
}

impl Display for ClientBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ClientBackend::Http => write!(f, "http"),
            ClientBackend::Local => write!(f, "local"),
        }
    }
}
