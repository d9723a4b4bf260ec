//! Deterministic text preparation for braille translation
//!
//! This crate holds the algorithms every translation backend shares:
//!
//! - **Case folding**: lower-casing text when capitals are not marked
//! - **Linearization**: flattening a nested attribute tree into one style
//!   bitmask per code point
//! - **Alignment**: turning hyphenator output into one breakpoint class per
//!   gap between input characters
//! - **Reassembly**: mapping engine output back onto the input, restoring
//!   whitespace and break markers
//!
//! Nothing here performs I/O or talks to a collaborator; orchestration lives
//! in `tactus-engine`.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashSet;
//! use tactus_core::{align, linearize, AttributeSpan, Breakpoint};
//!
//! let tree = AttributeSpan::builder()
//!     .add_width(2)
//!     .add(AttributeSpan::styled("em", 3))
//!     .build(5)
//!     .unwrap();
//! let linear = linearize(&tree, &HashSet::new());
//! assert_eq!(linear.values(), &[0, 0, 1, 1, 1]);
//!
//! let breakpoints = align("hello", "hel\u{00AD}lo").unwrap();
//! assert_eq!(breakpoints[2], Breakpoint::SoftHyphen);
//! ```

#![warn(missing_docs)]

pub mod attribute;
pub mod breakpoint;
pub mod case;
pub mod error;
pub mod linearize;
pub mod reassemble;

pub use attribute::{AttributeSpan, SpanBuilder};
pub use breakpoint::{align, is_marker, strip_markers, Breakpoint, SOFT_HYPHEN, ZERO_WIDTH_SPACE};
pub use case::CaseFolder;
pub use error::{CoreError, Result};
pub use linearize::{linearize, LinearAttributes, StyleIdTable, MAX_STYLES};
pub use reassemble::reassemble;
