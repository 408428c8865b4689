//! Error enum
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Xml(roxmltree::Error),
    Toml(toml::de::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    Http(reqwest::Error),
    Zip(zip::result::ZipError),
    /// A mandatory element or attribute is absent from a source document.
    MissingField(&'static str),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::Xml(e) => write!(f, "xml error: {}", e),
            Error::Toml(e) => write!(f, "registry error: {}", e),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "glob pattern error: {}", e),
            Error::Http(e) => write!(f, "http error: {}", e),
            Error::Zip(e) => write!(f, "zip error: {}", e),
            Error::MissingField(field) => write!(f, "missing required field `{}`", field),
            Error::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Error {
        Error::Xml(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Error {
        Error::Toml(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Http(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Error {
        Error::Zip(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
