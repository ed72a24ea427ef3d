//! # sqlgen
//!
//! Compiles a builder-call data-access DSL into parameterized SQL and
//! async accessor functions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 DSL source (Rust syntax)                 │
//! │   (record structs, entity statics, builder-call fns)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [dsl: declarations + interpreter]
//! ┌─────────────────────────────────────────────────────────┐
//! │          TableDefs + Statements per function             │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql: dialect-aware builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │          SQL text + ordered parameter names              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [emitter]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Record structs + async accessors over `runtime`        │
//! └─────────────────────────────────────────────────────────┘
//! ```

// Lets `#[derive(Table)]` output name `::sqlgen` inside this crate too.
extern crate self as sqlgen;

pub mod compile;
pub mod config;
pub mod dsl;
pub mod emitter;
pub mod model;
pub mod runtime;
pub mod sql;
pub mod telemetry;

pub use compile::{compile, compile_dir, compile_source, CompileError, CompileOptions};
pub use sql::Dialect;
