//! End-to-end compilation from DSL source to generated Rust.
//!
//! ```text
//! Rust source → syn → Tables/Entities → Statements → SQL text → Accessors
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sqlgen::compile::{compile_source, CompileOptions};
//! use sqlgen::sql::Dialect;
//!
//! let dsl = r#"
//!     #[derive(Table)]
//!     pub struct User {
//!         pub UserID: i64,
//!         pub UserName: String,
//!     }
//!
//!     const user: User = entity();
//!
//!     pub fn GetUser(userID: i64) {
//!         From(user);
//!         SelectAll(user);
//!         Where(user.UserID == userID);
//!     }
//! "#;
//!
//! let options = CompileOptions::default().with_dialect(Dialect::Postgres);
//! let output = compile_source(dsl, "users.rs", &options)?;
//! println!("{}", output.functions[0].sql);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::dsl::{interpret_file, Diagnostic, DslError, Reporter, SourcePos, UnsupportedPolicy};
use crate::emitter::{EmitConfig, Indent, RustEmitter, DEFAULT_RUNTIME_PATH};
use crate::sql::{Dialect, RenderedSql, ReturnMode, SqlBuilder, TokenSqlBuilder};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during compilation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("parse error at {pos}: {message}")]
    Parse { pos: SourcePos, message: String },

    #[error(transparent)]
    Dsl(#[from] DslError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl CompileError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> CompileError + '_ {
        move |source| CompileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

// ============================================================================
// Options
// ============================================================================

/// Options for compilation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// SQL dialect for the default builder.
    pub dialect: Dialect,
    /// Replacement rendering strategy; overrides `dialect` when set.
    pub sql_builder: Option<Box<dyn SqlBuilder>>,
    /// What to do with calls outside the builder vocabulary.
    pub unsupported: UnsupportedPolicy,
    /// Runtime path for generated imports, unless the source sets one.
    pub runtime_path: String,
    pub indent: Indent,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Generic,
            sql_builder: None,
            unsupported: UnsupportedPolicy::Warn,
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            indent: Indent::default(),
        }
    }
}

impl CompileOptions {
    /// Set the SQL dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Render with a custom builder.
    pub fn with_sql_builder(mut self, builder: Box<dyn SqlBuilder>) -> Self {
        self.sql_builder = Some(builder);
        self
    }

    pub fn with_unsupported(mut self, policy: UnsupportedPolicy) -> Self {
        self.unsupported = policy;
        self
    }

    pub fn with_runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    fn builder(&self) -> Box<dyn SqlBuilder> {
        match &self.sql_builder {
            Some(builder) => builder.clone(),
            None => Box::new(TokenSqlBuilder::new(self.dialect)),
        }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// SQL generated for one DSL function.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunction {
    pub name: String,
    /// Physical table the statement targets.
    pub table: String,
    pub sql: String,
    /// Bound names in placeholder order.
    pub params: Vec<String>,
    pub return_mode: ReturnMode,
}

/// Result of compiling one source unit.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// The generated Rust source.
    pub code: String,
    pub functions: Vec<CompiledFunction>,
    /// Non-fatal findings.
    pub diagnostics: Vec<Diagnostic>,
}

// ============================================================================
// Compilation Functions
// ============================================================================

/// Compile DSL source held in memory.
///
/// `file_name` only appears in the generated header comment.
pub fn compile_source(
    source: &str,
    file_name: &str,
    options: &CompileOptions,
) -> CompileResult<CompileOutput> {
    // Step 1: Parse
    let file = syn::parse_file(source).map_err(|e| CompileError::Parse {
        pos: SourcePos::from_span(e.span()),
        message: e.to_string(),
    })?;

    // Step 2: Extract tables, bind entities, interpret functions
    let mut reporter = Reporter::new(options.unsupported);
    let module = interpret_file(&file, &mut reporter)?;

    // Step 3: Render SQL
    let mut builder = options.builder();
    let rendered: Vec<RenderedSql> = module
        .functions
        .iter()
        .map(|function| {
            let sql = builder.render(&function.statement);
            tracing::debug!(
                function = %function.name,
                params = ?sql.params,
                "rendered sql:\n{}",
                sql.text
            );
            sql
        })
        .collect();

    // Step 4: Emit
    let config = EmitConfig {
        indent: options.indent.clone(),
        runtime_path: options.runtime_path.clone(),
        source_name: file_name.to_string(),
    };
    let code = RustEmitter::new(config).emit(&module, &rendered);

    let functions = module
        .functions
        .iter()
        .zip(rendered)
        .map(|(function, sql)| CompiledFunction {
            name: function.name.clone(),
            table: function.statement.table().to_string(),
            sql: sql.text,
            params: sql.params,
            return_mode: function.return_mode(),
        })
        .collect();

    Ok(CompileOutput {
        code,
        functions,
        diagnostics: reporter.into_diagnostics(),
    })
}

/// Compile one source file into one generated file.
///
/// On any failure the output file is removed, so no partial or stale
/// artefact is left behind.
pub fn compile(input: &Path, output: &Path, options: &CompileOptions) -> CompileResult<CompileOutput> {
    let result = compile_to(input, output, options);
    if result.is_err() && output.exists() {
        if let Err(e) = fs::remove_file(output) {
            tracing::warn!(path = %output.display(), error = %e, "failed to remove output");
        }
    }
    result
}

fn compile_to(input: &Path, output: &Path, options: &CompileOptions) -> CompileResult<CompileOutput> {
    let source = fs::read_to_string(input).map_err(CompileError::io(input))?;
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let compiled = compile_source(&source, &file_name, options)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(CompileError::io(parent))?;
    }
    fs::write(output, &compiled.code).map_err(CompileError::io(output))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        functions = compiled.functions.len(),
        "wrote generated file"
    );
    Ok(compiled)
}

/// Compile every `.rs` file directly inside `input_dir` into `output_dir`,
/// in file-name order. Stops at the first failure.
pub fn compile_dir(
    input_dir: &Path,
    output_dir: &Path,
    options: &CompileOptions,
) -> CompileResult<Vec<(PathBuf, CompileOutput)>> {
    if !input_dir.is_dir() {
        return Err(CompileError::NotADirectory(input_dir.to_path_buf()));
    }

    let mut inputs = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(CompileError::io(input_dir))? {
        let path = entry.map_err(CompileError::io(input_dir))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "rs") {
            inputs.push(path);
        }
    }
    inputs.sort();

    let mut outputs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let Some(name) = input.file_name() else {
            continue;
        };
        let output = output_dir.join(name);
        let compiled = compile(&input, &output, options)?;
        outputs.push((output, compiled));
    }
    Ok(outputs)
}

// ============================================================================
// Tests
// ============================================================================
