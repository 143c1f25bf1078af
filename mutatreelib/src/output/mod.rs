//! Output tree: materialize mutants next to their originals.
//!
//! This module handles the last stage of the pipeline - writing generated
//! variants into a tree that mirrors the source root. Every original file
//! owns a directory in the mirror:
//!
//! ```text
//! <output root>/com/example/Foo.java/
//!     original.java   byte-identical copy of the source file
//!     density.csv     optional "line,count" report
//!     1.java          first generated variant
//!     2.java          ...
//! ```
//!
//! - **MirroredEntry**: Layout of one original's output directory
//! - **DensityMap**: Per-line mutant counts and their CSV form
//! - **OutputWriter**: Preserves originals and claims variant numbers
//!
//! ## Example
//!
//! ```rust,ignore
//! use mutatreelib::output::OutputWriter;
//!
//! let writer = OutputWriter::new("src/main/java", "target/mutatree-results");
//! let rel = writer.write("src/main/java/com/example/Foo.java", "class Foo {}", None)?;
//! // rel == "com/example/Foo.java/1.java"
//! ```

pub mod density;
pub mod entry;
pub mod writer;

pub use density::{format_density, parse_density, read_density, write_density, DensityMap};
pub use entry::MirroredEntry;
pub use writer::OutputWriter;
