//! Tessera Core Types and Definitions
//!
//! This crate provides the data model shared by Tessera layout migrations.
//! It includes:
//!
//! - **Identifiers**: Typed source, entity and revision ids ([`identifier`] module)
//! - **Items**: Source elements awaiting resolution ([`item::LayoutItem`])
//! - **Components**: Placeable blocks and their display configuration ([`component`] module)
//! - **Sections**: Region-partitioned component containers ([`section::Section`])
//! - **Collections**: Nested layout values and their flattening ([`collection`] module)
//! - **Severity**: Message severities for migration reports ([`severity::Severity`])

pub mod collection;
pub mod component;
pub mod identifier;
pub mod item;
pub mod section;
pub mod severity;
