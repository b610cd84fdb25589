//! Converts SQL DDL schema dumps into Graphviz entity-relationship diagrams.
//!
//! The pipeline is three independent stages:
//!
//! 1. [`grammar`] parses the input into a syntax tree of statements.
//! 2. [`schema`] maps statements to tables and foreign key edges.
//! 3. [`render`] formats the model as DOT source.
//!
//! [`driver`] runs the stages over a whole input. Diagnostics are emitted as
//! `tracing` events; the library never installs a subscriber.

pub mod color;
pub mod config;
pub mod driver;
pub mod grammar;
pub mod render;
pub mod schema;

pub use config::RenderConfig;
pub use driver::{DriverError, OutputFormat, extract, generate, generate_json, run};
pub use grammar::ParseError;
pub use render::Header;
