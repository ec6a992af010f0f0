//! Element types of the document tree

pub mod command;
pub mod document;
pub mod entry;
pub mod path;
pub mod segment;

pub use command::{Command, CommandOption, Duration, DurationUnit, OptionValue};
pub use document::Document;
pub use entry::Entry;
pub use path::{FindQuery, Found, Parent, PathStep, SegmentPath};
pub use segment::{Segment, Segments};
