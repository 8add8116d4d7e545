#![warn(clippy::all)]
#![allow(clippy::missing_errors_doc, clippy::use_self, clippy::doc_markdown)]

//! Grid layout engine for responsive dashboards.
//!
//! This crate arranges rectangular widgets on a multi-column grid, one
//! arrangement per breakpoint. It compacts raw, possibly overlapping
//! arrangements into collision-free ones and finds free slots for new widgets.
//! Everything here is a pure function of its inputs; nothing is mutated in
//! place.

pub mod arrangement;
pub mod breakpoint;
pub mod clamp;
pub mod item;
pub mod mobile;
pub mod rect;
pub mod responsive;
pub mod scan;
pub mod stretch;

pub use arrangement::*;
pub use breakpoint::*;
pub use clamp::*;
pub use item::*;
pub use mobile::*;
pub use rect::*;
pub use responsive::*;
pub use stretch::*;
