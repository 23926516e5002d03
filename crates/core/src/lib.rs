//! Core library for manuscript-data
//!
//! This crate implements the **Functional Core** of the manuscript-data
//! program, following the Functional Core - Imperative Shell architectural
//! pattern.
//!
//! # Architecture Overview
//!
//! The project uses a two-crate architecture to enforce separation of
//! concerns:
//!
//! - **`manuscript_data_core`** (this crate): Pure transformation functions
//!   with zero I/O
//! - **`manuscript-data`**: I/O operations and orchestration (the Imperative
//!   Shell)
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`align`]: Version alignment: reconciling versioned preprint
//!   identifiers, publication dates, and version-number overrides into an
//!   ordered sequence of manuscript versions
//! - [`dates`]: Parsing and formatting of the timestamps the program accepts
//!   and emits
//! - [`manuscript`]: The output document model and the transformation that
//!   assembles it from fetched data
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use manuscript_data_core::align::align;
//!
//! // Create fixture data (no HTTP required)
//! let identifiers = vec!["10.1101/2021.01.01.000001v1".to_string()];
//! let dates = vec![chrono::Utc::now()];
//!
//! // Transform using pure function
//! let aligned = align(&identifiers, &dates, &[]).unwrap();
//!
//! // Assert on results (no mocking needed)
//! assert_eq!(aligned.len(), 1);
//! assert_eq!(aligned[0].version, 1);
//! ```

pub mod align;
pub mod dates;
pub mod manuscript;
