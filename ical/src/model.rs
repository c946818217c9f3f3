// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory model of an iCalendar stream.
//!
//! The model is untyped: names keep the spelling they were read
//! with, and property values are kept as text. [`ComponentKind`],
//! [`PropertyKind`] and [`ParameterKind`] classify names against RFC 5545
//! without losing the original spelling.

mod calendar;
mod component;
mod kind;
mod parameter;
mod property;

pub use calendar::Calendar;
pub use component::{BlockSpelling, Component};
pub use kind::{ComponentKind, ParameterKind, PropertyKind, ValueKind, is_x_name};
pub use parameter::{Parameter, ParameterValue};
pub use property::Property;
