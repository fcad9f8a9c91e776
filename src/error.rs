//! Error enum
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    ThreadPool(rayon::ThreadPoolBuildError),
    /// A date or timestamp that is present but can't be parsed.
    MalformedDate(String),
    /// Tagging sources disagree on the length of a sentence.
    AnnotationMismatch {
        tokens: usize,
        primary: usize,
        secondary: usize,
    },
    /// An identifier counter ran out of values.
    CounterOverflow(&'static str),
    Model(String),
    /// No initialized worker was left to take the task.
    NoWorker,
    /// A task panicked. Holds the panic message.
    Panic(String),
    Custom(String),
}

impl Error {
    /// Fatal errors abort the whole run rather than a single document.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::CounterOverflow(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io: {e}"),
            Error::Serde(e) => write!(f, "json: {e}"),
            Error::Glob(e) => write!(f, "glob: {e}"),
            Error::GlobPattern(e) => write!(f, "glob pattern: {e}"),
            Error::ThreadPool(e) => write!(f, "thread pool: {e}"),
            Error::MalformedDate(d) => write!(f, "malformed date: {d:?}"),
            Error::AnnotationMismatch {
                tokens,
                primary,
                secondary,
            } => write!(
                f,
                "annotation mismatch: {tokens} tokens, {primary} primary, {secondary} secondary"
            ),
            Error::CounterOverflow(name) => write!(f, "{name} counter overflow"),
            Error::Model(m) => write!(f, "model: {m}"),
            Error::NoWorker => write!(f, "no initialized worker available"),
            Error::Panic(m) => write!(f, "panicked: {m}"),
            Error::Custom(s) => write!(f, "{s}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
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

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Error {
        Error::ThreadPool(e)
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(e: tempfile::PersistError) -> Error {
        Error::Io(e.error)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}
