// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Syntax layer: unfolding, lexing, content line scanning and tree building.
//!
//! ```text
//! Bytes → Unfolder → Logical Lines → Lexer → Scanner → Content Lines → Tree Builder → Calendar
//! ```

mod lexer;
mod scanner;
mod tree_builder;
mod unfold;

pub use lexer::{SpannedToken, Token, tokenize};
pub use scanner::{ContentLine, ScannedParameter, ScannedParameterValue, scan_line};
pub use tree_builder::{BuilderState, TreeBuilder, build_tree};
pub use unfold::{LogicalLine, Unfolder, unfold_str};
