// SPDX-License-Identifier: MPL-2.0
//! Error types shared by the lightbox core.
//!
//! Most failure modes in the core are absorbed silently (composition target
//! misses, navigation past a finite boundary). The variants here cover the
//! few conditions that must surface: configuration I/O and internal contract
//! violations.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    /// A navigation action reached the state reducer with a tag it does not
    /// know. This is a programming error inside the composed viewer and is
    /// never retried.
    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn unknown_action_names_the_offender() {
        let err = Error::UnknownAction("payload on topic `swipe`".into());
        assert!(err.to_string().contains("swipe"));
    }

    #[test]
    fn toml_parse_failure_maps_to_config() {
        let parsed: std::result::Result<toml::Table, _> = toml::from_str("not = valid = toml");
        let err: Error = parsed.expect_err("invalid toml").into();
        assert!(matches!(err, Error::Config(_)));
    }
}
