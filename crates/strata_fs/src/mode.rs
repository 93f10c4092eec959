// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::str::FromStr;

use strata_tier::Error;

/// How a [`FileStore`](crate::FileStore) reads and writes file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileMode {
    /// Contents must be valid UTF-8, on write and on read.
    Text,
    /// Contents are arbitrary bytes.
    Bytes,
}

impl FileMode {
    /// Returns the name of this mode as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bytes => "bytes",
        }
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileMode {
    type Err = Error;

    /// Parses `"text"` or `"bytes"`; anything else is a configuration error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "bytes" => Ok(Self::Bytes),
            other => Err(Error::configuration(format!(
                "unsupported file mode '{other}', expected 'text' or 'bytes'"
            ))),
        }
    }
}
