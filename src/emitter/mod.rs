//! Rust source emitter - serializes an interpreted DSL module to Rust.
//!
//! One generated file holds the carried `use` items, one record struct per
//! table and one async accessor per DSL function. Generated code depends
//! only on the runtime interface (see [`crate::runtime`]).
//!
//! # Example
//!
//! ```ignore
//! use sqlgen::emitter::{EmitConfig, RustEmitter};
//!
//! let emitter = RustEmitter::new(EmitConfig::default());
//! let code = emitter.emit(&module, &rendered);
//! ```

pub mod accessor;
pub mod format;
pub mod record;

pub use format::{escape_rust_string, quote_string, Indent, IndentWriter};

use crate::dsl::DslModule;
use crate::sql::{RenderedSql, ReturnMode, Statement};

/// Runtime path used when neither the DSL nor the options name one.
pub const DEFAULT_RUNTIME_PATH: &str = "sqlgen::runtime";

/// Configuration for Rust emission.
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// Indentation style (tabs or spaces).
    pub indent: Indent,
    /// Path generated code imports the runtime from.
    pub runtime_path: String,
    /// Input file name, quoted in the header comment.
    pub source_name: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            source_name: String::new(),
        }
    }
}

/// Emitter for one DSL module.
pub struct RustEmitter {
    config: EmitConfig,
}

impl RustEmitter {
    #[must_use]
    pub fn new(config: EmitConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EmitConfig {
        &self.config
    }

    /// Emit the module. `rendered[i]` is the SQL of `module.functions[i]`.
    #[must_use]
    pub fn emit(&self, module: &DslModule, rendered: &[RenderedSql]) -> String {
        let mut w = IndentWriter::new(self.config.indent.clone());

        self.emit_header(&mut w);

        let package = module.config.package_name.as_deref();
        if let Some(package) = package {
            w.open_block(&format!("pub mod {} {{", package));
        }

        let runtime_path = module
            .config
            .runtime_path
            .as_deref()
            .unwrap_or(&self.config.runtime_path);
        let items = runtime_imports(module);
        if !items.is_empty() {
            w.write_line(&format!("use {}::{{{}}};", runtime_path, items.join(", ")));
        }
        for import in &module.imports {
            w.write_line(import);
        }

        for table in &module.tables {
            w.blank_line();
            record::emit_record(&mut w, table);
        }

        for (function, sql) in module.functions.iter().zip(rendered) {
            w.blank_line();
            accessor::emit_accessor(&mut w, function, sql);
        }

        if package.is_some() {
            w.close_block("}");
        }

        w.into_string()
    }

    fn emit_header(&self, w: &mut IndentWriter) {
        if self.config.source_name.is_empty() {
            w.write_line("// Code generated by sqlgen; do not edit.");
        } else {
            w.write_line(&format!(
                "// Code generated by sqlgen from {}; do not edit.",
                self.config.source_name
            ));
        }
        w.write_line("#![allow(clippy::all, dead_code, non_snake_case, unused_imports)]");
        w.blank_line();
    }
}

/// Runtime items the generated functions refer to, in import order.
pub fn runtime_imports(module: &DslModule) -> Vec<&'static str> {
    let functions = &module.functions;
    if functions.is_empty() {
        return Vec::new();
    }
    let has_channel = functions
        .iter()
        .any(|f| f.return_mode() == ReturnMode::RecordChannel);
    let has_select = functions
        .iter()
        .any(|f| matches!(f.statement, Statement::Select(_)));
    let has_exec = functions
        .iter()
        .any(|f| !matches!(f.statement, Statement::Select(_)));
    let has_args = functions
        .iter()
        .any(|f| !f.statement.parameters().is_empty());

    let mut items = Vec::new();
    if has_channel {
        items.push("CancellationToken");
    }
    items.extend(["Context", "DbError"]);
    if has_exec {
        items.push("ExecResult");
    }
    items.push("Executor");
    if has_select {
        items.push("Row");
    }
    if has_args {
        items.push("Value");
    }
    if has_channel {
        items.push("tokio");
    }
    items
}
