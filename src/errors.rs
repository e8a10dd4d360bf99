//
// Errors
//
use std::io;
use std::result;
use std::error;
use std::fmt;
use std::path::PathBuf;
use rusqlite;

/// Type alias for lexpairs errors
pub type Result<X> = result::Result<X, Error>;

/// Wrapper for many kinds of errors occuring while ingesting a corpus
#[derive(Debug)]
pub enum Error {
    IOError(io::Error),
    SqliteError(rusqlite::Error),
    UnknownCategory(String),
    MissingDirectory(&'static str, PathBuf),
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::IOError(ref err) => write!(f, "IO error: {}", err),
            Error::SqliteError(ref err) => write!(f, "SQLite error: {}", err),
            Error::UnknownCategory(ref name) => write!(f,
                "Unknown word category {:?}; expected one of verb, noun or noun-phrase", name),
            Error::MissingDirectory(ref info, ref path) => write!(f,
                "The {} must already exist at this point but {} is not a directory. \
                Wrong path? Did you set ONTOLOGYPORTAL_GIT?",
                info, path.display()),
            Error::Other(ref info) => write!(f, "{}", info),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IOError(ref err) => Some(err),
            Error::SqliteError(ref err) => Some(err),
            Error::UnknownCategory(_) => None,
            Error::MissingDirectory(_, _) => None,
            Error::Other(_) => None,
        }
    }
}
//
// Convert everything else into Error
//
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IOError(err)
    }
}
impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::SqliteError(err)
    }
}

//
// Convert Error into a general io Error
//
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        io::Error::new(io::ErrorKind::Other, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_names_the_culprit() {
        let msg = Error::UnknownCategory("adjective".to_string()).to_string();
        assert!(msg.contains("\"adjective\""));
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(error::Error::source(&err).is_some());
        let back: io::Error = err.into();
        assert_eq!(back.kind(), io::ErrorKind::Other);
    }
}
