//! Spanlog – the primitive value-type core of a rule-based text-query engine.
//!
//! The engine evaluates relational/datalog-style rules over text. Regions of
//! text matched by a rule are represented as half-open character intervals
//! ("spans") that flow through evaluation alongside ordinary scalar values:
//! * A [`datatype::Span`] is an immutable interval over two integer offsets.
//! * A [`datatype::Value`] carries one value of any supported kind.
//! * [`datatype::DataTypes`] is the closed set of tags naming those kinds.
//! * [`datatype::DataTypeMapping`] resolves a tag to a description of the
//!   concrete type it designates.
//!
//! The collaborators that sit around this core (rule parser, extraction
//! engine, solver, front ends) construct spans directly from extracted
//! offsets, or consult the mapping to decide how a declared or inferred tag
//! should be coerced before a value is built. Nothing here is mutable after
//! construction and nothing blocks, so all of it can be shared freely
//! between threads.
//!
//! ## Modules
//! * [`datatype`] – The [`datatype::DataType`] trait, the provided concrete
//!   types (span, integer, string), tags and the tag-to-type mapping.
//! * [`error`] – The [`error::SpanlogError`] enum covering validation,
//!   parsing and comparison failures.
//!
//! ## Data Types
//! Any type implementing [`datatype::DataType`] can travel through the
//! engine as a value. Built-ins demonstrate patterns for stable identifiers
//! (`UID`) and constant `DATA_TYPE` strings enabling heterogeneous indexing.
//!
//! ## Ordering
//! Spans order lexicographically on `(start, end)`, so sorting a batch of
//! extracted matches puts them in reading order and makes duplicates
//! adjacent. Values only order within a kind; comparing a span to an
//! integer is reported as an error instead of being given a made-up answer.
//!
//! ## Quick Start
//! ```
//! use spanlog::datatype::{DataTypeMapping, DataTypes, Span, Value};
//! let mut matches = vec![Span::new(14, 16), Span::new(13, 17)];
//! matches.sort();
//! assert_eq!(matches[0], Span::new(13, 17));
//! let descriptor = DataTypeMapping::resolve(DataTypes::Span);
//! assert_eq!(descriptor.data_type(), "Span");
//! assert_eq!(Value::infer("[13, 17)").data_type(), DataTypes::Span);
//! ```

pub mod datatype;
pub mod error;
