//! sqlgen CLI - Compile DSL sources into SQL accessors
//!
//! Usage:
//!   sqlgen compile <file.rs|dir> [--output <dir>] [--dialect <dialect>] [--strict]
//!   sqlgen list <file.rs> [--dialect <dialect>]
//!   sqlgen check <file.rs>
//!
//! Examples:
//!   sqlgen compile dal/users.rs
//!   sqlgen compile dal --output src/gen --dialect postgres
//!   sqlgen list dal/users.rs --dialect mysql

use clap::{Parser, Subcommand, ValueEnum};
use sqlgen::compile::{compile, compile_dir, compile_source, CompileOptions, CompileOutput};
use sqlgen::config::Settings;
use sqlgen::dsl::{Diagnostic, UnsupportedPolicy};
use sqlgen::sql::Dialect;
use sqlgen::telemetry;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Directory generated files go to when neither the CLI nor the config names one.
const DEFAULT_OUTPUT_DIR: &str = "gen";

#[derive(Parser)]
#[command(name = "sqlgen")]
#[command(about = "sqlgen - Compile a builder-call DSL into SQL and async accessors")]
#[command(version)]
struct Cli {
    /// Path to a sqlgen.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a DSL file, or every .rs file in a directory
    Compile {
        /// Path to the DSL file or directory
        input: PathBuf,

        /// Output directory (defaults to `gen` next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// SQL dialect to generate
        #[arg(short, long)]
        dialect: Option<DialectArg>,

        /// Fail on calls outside the builder vocabulary
        #[arg(long)]
        strict: bool,
    },

    /// List the functions of a DSL file with their SQL
    List {
        /// Path to the DSL file
        file: PathBuf,

        /// SQL dialect to generate
        #[arg(short, long)]
        dialect: Option<DialectArg>,
    },

    /// Validate a DSL file without writing output
    Check {
        /// Path to the DSL file
        file: PathBuf,

        /// Fail on calls outside the builder vocabulary
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum DialectArg {
    Generic,
    Postgres,
    Mysql,
    Tsql,
    Sqlite,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Generic => Dialect::Generic,
            DialectArg::Postgres => Dialect::Postgres,
            DialectArg::Mysql => Dialect::MySql,
            DialectArg::Tsql => Dialect::TSql,
            DialectArg::Sqlite => Dialect::Sqlite,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init_logging(cli.verbose);

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match cli.command {
        Commands::Compile {
            input,
            output,
            dialect,
            strict,
        } => cmd_compile(&settings, input, output, dialect, strict),
        Commands::List { file, dialect } => cmd_list(&settings, file, dialect),
        Commands::Check { file, strict } => cmd_check(&settings, file, strict),
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings, ExitCode> {
    let result = match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    result.map_err(|e| {
        eprintln!("Configuration error: {}", e);
        ExitCode::FAILURE
    })
}

fn options_for(
    settings: &Settings,
    dialect: Option<DialectArg>,
    strict: bool,
) -> Result<CompileOptions, ExitCode> {
    let mut options = settings.compile_options().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        ExitCode::FAILURE
    })?;
    if let Some(dialect) = dialect {
        options = options.with_dialect(dialect.into());
    }
    if strict {
        options = options.with_unsupported(UnsupportedPolicy::Error);
    }
    Ok(options)
}

fn print_diagnostics(file: &Path, diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        eprintln!("{}: {}", file.display(), diag);
    }
}

fn cmd_compile(
    settings: &Settings,
    input: PathBuf,
    output: Option<PathBuf>,
    dialect: Option<DialectArg>,
    strict: bool,
) -> ExitCode {
    let options = match options_for(settings, dialect, strict) {
        Ok(o) => o,
        Err(code) => return code,
    };

    let output_dir = output
        .or_else(|| settings.generator.output_dir.clone())
        .unwrap_or_else(|| {
            let base = if input.is_dir() {
                input.as_path()
            } else {
                input.parent().unwrap_or(Path::new(""))
            };
            base.join(DEFAULT_OUTPUT_DIR)
        });

    let result = if input.is_dir() {
        compile_dir(&input, &output_dir, &options)
    } else {
        let Some(name) = input.file_name() else {
            eprintln!("Not a file: {}", input.display());
            return ExitCode::FAILURE;
        };
        let target = output_dir.join(name);
        compile(&input, &target, &options).map(|compiled| vec![(target, compiled)])
    };

    match result {
        Ok(outputs) => {
            for (path, compiled) in &outputs {
                print_diagnostics(path, &compiled.diagnostics);
                println!(
                    "{} ({} functions)",
                    path.display(),
                    compiled.functions.len()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Compilation error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn compile_file(file: &Path, options: &CompileOptions) -> Result<CompileOutput, ExitCode> {
    let source = fs::read_to_string(file).map_err(|e| {
        eprintln!("Error reading file '{}': {}", file.display(), e);
        ExitCode::FAILURE
    })?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    compile_source(&source, &file_name, options).map_err(|e| {
        eprintln!("{}: {}", file.display(), e);
        ExitCode::FAILURE
    })
}

fn cmd_list(settings: &Settings, file: PathBuf, dialect: Option<DialectArg>) -> ExitCode {
    let options = match options_for(settings, dialect, false) {
        Ok(o) => o,
        Err(code) => return code,
    };
    let compiled = match compile_file(&file, &options) {
        Ok(c) => c,
        Err(code) => return code,
    };
    print_diagnostics(&file, &compiled.diagnostics);

    println!("File: {}", file.display());
    println!("Dialect: {:?}", options.dialect);
    if compiled.functions.is_empty() {
        println!();
        println!("(no functions)");
    }
    for function in &compiled.functions {
        println!();
        println!("{} -> {}", function.name, function.return_mode.resolve());
        println!("  table: {}", function.table);
        if !function.params.is_empty() {
            println!("  params: {}", function.params.join(", "));
        }
        for line in function.sql.lines() {
            println!("  {}", line);
        }
    }

    ExitCode::SUCCESS
}

fn cmd_check(settings: &Settings, file: PathBuf, strict: bool) -> ExitCode {
    let options = match options_for(settings, None, strict) {
        Ok(o) => o,
        Err(code) => return code,
    };
    match compile_file(&file, &options) {
        Ok(compiled) => {
            print_diagnostics(&file, &compiled.diagnostics);
            println!(
                "OK: {} is valid ({} functions, {} warnings)",
                file.display(),
                compiled.functions.len(),
                compiled.diagnostics.len()
            );
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}
