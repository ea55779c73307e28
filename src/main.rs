use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pyret_sitter::grammars::pyret;
use pyret_sitter::{GrammarTable, Language, ParseOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pyret-sitter", version, about = "Table-driven Pyret parser")]
struct Cli {
    /// Log filter, e.g. "debug" or "pyret_sitter=trace" (defaults to RUST_LOG, then "warn")
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a Pyret source file and print its syntax tree
    Parse {
        /// Source file path
        file: PathBuf,
        /// Print the tree as JSON instead of an S-expression
        #[arg(long)]
        json: bool,
        /// Only report errors
        #[arg(short, long)]
        quiet: bool,
        /// Parser options file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the symbols of the bundled grammar
    Symbols,
    /// Write the bundled grammar table as a binary artifact
    DumpTable {
        /// Output path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Load a grammar table artifact (or the bundled table) and report on it
    CheckTable {
        /// Artifact path; the bundled table when omitted
        path: Option<PathBuf>,
    },
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {msg}");
    std::process::exit(1);
}

fn bundled_language() -> &'static Language {
    pyret::language().unwrap_or_else(|err| fail(err))
}

fn run_parse(file: &Path, json: bool, quiet: bool, config: Option<&Path>) {
    let options = match config {
        Some(path) => ParseOptions::from_path(path).unwrap_or_else(|err| fail(err)),
        None => ParseOptions::default(),
    };
    let source = std::fs::read(file)
        .unwrap_or_else(|err| fail(format!("could not read {}: {err}", file.display())));

    let parser = pyret_sitter::Parser::with_options(bundled_language(), options);
    let tree = parser.parse(&source);

    if !quiet {
        if json {
            match serde_json::to_string_pretty(&tree.to_json()) {
                Ok(text) => println!("{text}"),
                Err(err) => fail(err),
            }
        } else {
            println!("{}", tree.to_sexp());
        }
    }

    if tree.has_error() {
        let text = String::from_utf8_lossy(&source);
        pyret_sitter::diagnostics::render_syntax_errors(&text, tree.errors());
        eprintln!("error [{}]: {} syntax error(s)", file.display(), tree.errors().len());
        std::process::exit(1);
    }
}

fn run_symbols() {
    let language = bundled_language();
    for (id, name) in language.symbol_names().enumerate() {
        let symbol = pyret_sitter::Symbol(id as u16);
        let kind = if language.symbol_is_terminal(symbol) { "terminal" } else { "non-terminal" };
        let mut flags = Vec::new();
        if language.symbol_is_named(symbol) {
            flags.push("named");
        }
        if !language.symbol_is_visible(symbol) {
            flags.push("hidden");
        }
        println!("{id:>3}  {name:<24} {kind:<12} {}", flags.join(","));
    }
}

fn run_dump_table(output: &Path) {
    let bytes = pyret::table().to_bytes().unwrap_or_else(|err| fail(err));
    if let Err(err) = std::fs::write(output, &bytes) {
        fail(format!("could not write {}: {err}", output.display()));
    }
    eprintln!("wrote {} bytes to {}", bytes.len(), output.display());
}

fn run_check_table(path: Option<&Path>) {
    let language = match path {
        Some(path) => {
            let data = std::fs::read(path)
                .unwrap_or_else(|err| fail(format!("could not read {}: {err}", path.display())));
            let table = GrammarTable::from_bytes(&data).unwrap_or_else(|err| fail(err));
            // The artifact does not carry code; only the bundled grammar's scanner is known here.
            let table = if table.name == "pyret" {
                table.with_scanner(Arc::new(pyret::ParenScanner))
            } else {
                table
            };
            Language::load(table).unwrap_or_else(|err| fail(err))
        }
        None => bundled_language().clone(),
    };
    println!("language: {}", language.name());
    println!("version:  {}", language.version());
    println!("symbols:  {}", language.symbol_count());
    println!("fields:   {}", language.field_count());
    println!("states:   {}", language.state_count());
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    match cli.command {
        Commands::Parse { file, json, quiet, config } => {
            run_parse(&file, json, quiet, config.as_deref());
        }
        Commands::Symbols => run_symbols(),
        Commands::DumpTable { output } => run_dump_table(&output),
        Commands::CheckTable { path } => run_check_table(path.as_deref()),
    }
}
