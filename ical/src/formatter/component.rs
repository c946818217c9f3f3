// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component formatting.

use std::io::{self, Write};

use crate::formatter::folding::FoldingWriter;
use crate::formatter::property::write_property;
use crate::model::{Calendar, Component};

/// Write root properties, then every top-level component.
pub fn write_calendar<W: Write>(f: &mut FoldingWriter<W>, calendar: &Calendar) -> io::Result<()> {
    for property in &calendar.properties {
        write_property(f, property)?;
    }
    for component in &calendar.components {
        write_component(f, component)?;
    }
    Ok(())
}

/// Write a component with its properties and children, recursively.
pub fn write_component<W: Write>(
    f: &mut FoldingWriter<W>,
    component: &Component,
) -> io::Result<()> {
    with_block(f, component, |f| {
        for property in &component.properties {
            write_property(f, property)?;
        }
        for child in &component.children {
            write_component(f, child)?;
        }
        Ok(())
    })
}

fn with_block<W: Write, F: FnOnce(&mut FoldingWriter<W>) -> io::Result<()>>(
    f: &mut FoldingWriter<W>,
    component: &Component,
    write_content: F,
) -> io::Result<()> {
    write!(f, "{}:{}", component.begin_keyword(), component.name)?;
    f.end_line()?;

    write_content(f)?;

    write!(f, "{}:{}", component.end_keyword(), component.end_name())?;
    f.end_line()
}
