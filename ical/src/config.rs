// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Options for reading iCalendar streams, and the fold lengths shared by the
//! reader and the writer.

use std::env;

use strum::{Display, EnumString};

/// Maximum line length in octets (excluding CRLF) per RFC 5545 Section 3.1.
pub const MAX_FOLD_LENGTH: usize = 75;

/// Shorter fold length, handy for exercising the folding code in tests.
pub const REDUCED_FOLD_LENGTH: usize = 73;

/// Environment variable selecting the unfolding mode (`strict` or `relaxed`).
pub const ENV_UNFOLDING: &str = "CALFOLD_UNFOLDING";

/// Environment variable toggling validation after parsing (`true` or `false`).
pub const ENV_VALIDATE: &str = "CALFOLD_VALIDATE";

/// How continuation lines are recognized when unfolding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Unfolding {
    /// Only CRLF followed by a single SPACE or HTAB is a fold.
    #[default]
    Strict,

    /// Also accept bare LF folds, lone CR line ends and blank lines, as
    /// written by some non-conformant producers.
    Relaxed,
}

impl Unfolding {
    /// Returns `true` for [`Unfolding::Relaxed`].
    #[must_use]
    pub const fn is_relaxed(self) -> bool {
        matches!(self, Self::Relaxed)
    }
}

/// Options for parsing an iCalendar stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Unfolding mode.
    ///
    /// Default: [`Unfolding::Strict`].
    pub unfolding: Unfolding,

    /// Run the validator on the built calendar and fail on violations.
    ///
    /// Default: `false`, so that non-conformant but parseable input can be
    /// echoed back unchanged.
    pub validate: bool,
}

impl ParseOptions {
    /// Set the unfolding mode.
    #[must_use]
    pub const fn unfolding(mut self, unfolding: Unfolding) -> Self {
        self.unfolding = unfolding;
        self
    }

    /// Shorthand for choosing between strict and relaxed unfolding.
    #[must_use]
    pub const fn relaxed(mut self, relaxed: bool) -> Self {
        self.unfolding = if relaxed {
            Unfolding::Relaxed
        } else {
            Unfolding::Strict
        };
        self
    }

    /// Enable or disable validation after building.
    #[must_use]
    pub const fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Read options from [`ENV_UNFOLDING`] and [`ENV_VALIDATE`].
    ///
    /// Unset variables keep their defaults; unparsable values are logged and
    /// ignored. Call this once and pass the result around, the options are
    /// not re-read mid-stream.
    #[tracing::instrument]
    #[must_use]
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Ok(value) = env::var(ENV_UNFOLDING) {
            match value.trim().parse::<Unfolding>() {
                Ok(unfolding) => options.unfolding = unfolding,
                Err(_) => tracing::warn!(%value, "ignoring unknown {ENV_UNFOLDING} value"),
            }
        }

        if let Ok(value) = env::var(ENV_VALIDATE) {
            match value.trim().to_ascii_lowercase().parse::<bool>() {
                Ok(validate) => options.validate = validate,
                Err(_) => tracing::warn!(%value, "ignoring unknown {ENV_VALIDATE} value"),
            }
        }

        tracing::debug!(?options, "loaded parse options from environment");
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfolding_parses_case_insensitively() {
        assert_eq!("relaxed".parse::<Unfolding>(), Ok(Unfolding::Relaxed));
        assert_eq!("STRICT".parse::<Unfolding>(), Ok(Unfolding::Strict));
        assert!("lenient".parse::<Unfolding>().is_err());
        assert_eq!(Unfolding::Relaxed.to_string(), "relaxed");
    }

    #[test]
    fn parse_options_builders() {
        let options = ParseOptions::default();
        assert_eq!(options.unfolding, Unfolding::Strict);
        assert!(!options.validate);

        let options = options.relaxed(true).validate(true);
        assert!(options.unfolding.is_relaxed());
        assert!(options.validate);

        let options = options.unfolding(Unfolding::Strict);
        assert!(!options.unfolding.is_relaxed());
    }
}
