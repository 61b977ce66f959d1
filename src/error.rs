//! Error type shared by the settings adapter and the engine handles.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("`{0}` is not an engine configuration parameter")]
    UnknownParam(String),
    #[error("illegal value `{value}` for {name}: {reason}")]
    IllegalParam {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("environment home {} does not exist", .0.display())]
    HomeNotFound(PathBuf),
    #[error("database `{0}` does not exist")]
    DatabaseNotFound(String),
    #[error("incompatible configuration: {0}")]
    IncompatibleConfig(&'static str),
    #[error("{0} handle is closed")]
    Closed(&'static str),
    #[error("malformed settings at line {line}: `{text}`")]
    MalformedSettings { line: usize, text: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
