// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lossless reading, validation and writing of iCalendar (RFC 5545) streams.
//!
//! Parsing turns a stream into a [`Calendar`] tree of [`Component`]s and
//! [`Property`]s. Names keep their original spelling and values keep their
//! original wire form, so a calendar that is parsed and written back without
//! changes comes out byte for byte the same (apart from line endings and
//! fold points, which are normalized).
//!
//! ```
//! use calfold::{format, parse};
//!
//! let src = "BEGIN:VEVENT\r\nSUMMARY:Hello, World\\, again\r\nEND:VEVENT\r\n";
//! let calendar = parse(src).unwrap();
//!
//! let event = &calendar.components[0];
//! assert_eq!(event.property("summary").unwrap().value(), "Hello, World, again");
//! assert_eq!(format(&calendar).unwrap(), src);
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

pub mod config;
pub mod error;
pub mod escape;
pub mod formatter;
pub mod keyword;
pub mod model;
mod parser;
pub mod syntax;
pub mod validate;

pub use crate::config::{
    ENV_UNFOLDING, ENV_VALIDATE, MAX_FOLD_LENGTH, ParseOptions, REDUCED_FOLD_LENGTH, Unfolding,
};
pub use crate::error::{
    OutputError, ParameterErrorKind, ParseError, SyntaxError, SyntaxErrorKind,
};
pub use crate::formatter::{FoldingStyle, FormatOptions, format, output};
pub use crate::model::{
    BlockSpelling, Calendar, Component, ComponentKind, Parameter, ParameterKind, ParameterValue, Property,
    PropertyKind, ValueKind,
};
pub use crate::parser::{build, parse, parse_with};
pub use crate::validate::{Cardinality, ValidationError, Validator, Violation, validate};
