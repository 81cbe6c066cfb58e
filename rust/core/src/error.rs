// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing mesh attributes or annotations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    #[error("attribute streams are not index-aligned: {positions} positions, {tex_coords} texture coordinates")]
    AttributeCountMismatch { positions: usize, tex_coords: usize },

    #[error("invalid color key '{0}': expected 6 hex digits")]
    InvalidColorKey(String),
}

impl Error {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Error::MalformedLine {
            line,
            message: message.into(),
        }
    }

    /// Line number the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}
