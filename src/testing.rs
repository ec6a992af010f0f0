//! Testing utilities for document assertions
//!
//! Tests that check a parsed tree should go through [`assert_doc`] rather
//! than walking the segment maps by hand. Segments are addressed by index in
//! sorted order, exactly as [`Document::format`](crate::ast::Document::format)
//! renders them, and times are compared in their fully qualified form.
//!
//! ```rust,ignore
//! use dtl::testing::assert_doc;
//!
//! let doc = dtl::parse("@2024\n\t@June\n\t\t@1st [Standup]\n")?;
//! assert_doc(&doc)
//!     .segment_count(1)
//!     .segment(0, |year| {
//!         year.time("2024").child(0, |june| {
//!             june.time("2024 June").child(0, |day| {
//!                 day.time("2024 June 1st").description("Standup");
//!             });
//!         });
//!     });
//! ```
//!
//! Failures name the path to the offending node (`segments[0]:children[1]`)
//! and list the times that were found instead.

mod testing_assertions;

pub use testing_assertions::{assert_doc, CommandAssertion, DocumentAssertion, SegmentAssertion};
