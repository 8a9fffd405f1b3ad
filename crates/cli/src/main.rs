//! jsdoc-stub CLI: generate JSDoc comment stubs from the terminal.
//!
//! Calls `jsdoc-stub-core` directly with no server in between.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use jsdoc_stub_core::returns::return_tag;
use jsdoc_stub_core::signature::extract_parameters;
use jsdoc_stub_core::{
    collect_stub_edits, load_config, try_generate_stub, CommentDialect, SourceText, StubConfig,
    TextSnapshot, CONFIG_FILE_NAME,
};

/// jsdoc-stub CLI: JSDoc comment stubs for JavaScript and TypeScript functions.
#[derive(Parser)]
#[command(name = "jsdoc-stub", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Directory holding `.jsdocstub.toml` (default: the file's directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stub for the comment opener on a given line
    Stub {
        /// Source file
        file: PathBuf,

        /// Line holding the `/**` opener (1-indexed)
        #[arg(long)]
        line: usize,
    },
    /// Show the parameters and return tag detected below a given line
    Params {
        /// Source file
        file: PathBuf,

        /// Line holding the `/**` opener (1-indexed)
        #[arg(long)]
        line: usize,
    },
    /// Expand every bare `/**` line that sits above a function
    Fill {
        /// Source file
        file: PathBuf,

        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Write a default `.jsdocstub.toml`
    Init {
        /// Project path (default: current directory)
        path: Option<PathBuf>,
    },
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn read_source(file: &Path) -> SourceText {
    let content = std::fs::read_to_string(file)
        .unwrap_or_else(|e| fail(format!("Could not read {}: {e}", file.display())));
    SourceText::new(content)
}

fn resolve_config(root: Option<&Path>, file: &Path) -> StubConfig {
    let root = match root {
        Some(r) => r.to_path_buf(),
        None => file.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new(".")).to_path_buf(),
    };
    debug!(root = %root.display(), "Resolving config");
    load_config(&root)
}

/// Offset just past the end of 1-indexed `line`, where a typed `/**` would leave the cursor.
fn trigger_position(source: &SourceText, file: &Path, line: usize) -> usize {
    line.checked_sub(1)
        .and_then(|n| source.line(n))
        .map(|span| span.end())
        .unwrap_or_else(|| fail(format!("{}: no line {line} ({} lines)", file.display(), source.line_count())))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jsdoc_stub=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stub { file, line } => {
            let config = resolve_config(cli.root.as_deref(), &file);
            let source = read_source(&file);
            let dialect = config.dialect_for_path(&file);
            let position = trigger_position(&source, &file, line);
            let edit = try_generate_stub(&source, position, dialect, source.line_ending(), &config)
                .unwrap_or_else(|e| fail(e));

            if cli.json {
                let output = serde_json::json!({
                    "path": file.display().to_string(),
                    "line": line,
                    "dialect": dialect,
                    "stub": edit.as_ref().map(|e| &e.text),
                });
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
            } else {
                match edit {
                    Some(edit) => println!("{}", edit.text),
                    None => fail(format!("No function declaration follows line {line}")),
                }
            }
        }
        Commands::Params { file, line } => {
            let config = resolve_config(cli.root.as_deref(), &file);
            let source = read_source(&file);
            let dialect = config.dialect_for_path(&file);
            let position = trigger_position(&source, &file, line);
            let params = extract_parameters(&source, position, dialect).unwrap_or_else(|e| fail(e));
            let ret = return_tag(&source, position, dialect, config.return_tag_mode).unwrap_or_else(|e| fail(e));

            if cli.json {
                let output = serde_json::json!({
                    "dialect": dialect,
                    "parameters": params,
                    "returns": ret,
                });
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
            } else {
                println!("Dialect:    {}", dialect.label());
                if params.is_empty() {
                    println!("Parameters: (none)");
                } else {
                    println!("Parameters:");
                    for p in &params {
                        match &p.ty {
                            Some(ty) => println!("  {:<20} {}", p.name, ty),
                            None => println!("  {}", p.name),
                        }
                    }
                }
                let returns = match &ret {
                    jsdoc_stub_core::ReturnTag::None => "(none)".to_string(),
                    jsdoc_stub_core::ReturnTag::Plain => "@returns".to_string(),
                    jsdoc_stub_core::ReturnTag::Typed(ty) => format!("@returns {{{ty}}}"),
                };
                println!("Returns:    {returns}");
            }
        }
        Commands::Fill { file, write } => {
            let config = resolve_config(cli.root.as_deref(), &file);
            let mut source = read_source(&file);
            let dialect: CommentDialect = config.dialect_for_path(&file);
            let edits = collect_stub_edits(&source, dialect, source.line_ending(), &config);
            debug!(path = %file.display(), stubs = edits.len(), "Filling stubs");

            // Back to front so earlier ranges stay valid.
            for edit in edits.iter().rev() {
                source.replace(edit.range.clone(), &edit.text).unwrap_or_else(|e| fail(e));
            }

            if write {
                std::fs::write(&file, source.text())
                    .unwrap_or_else(|e| fail(format!("Could not write {}: {e}", file.display())));
            }
            if cli.json {
                let output = serde_json::json!({
                    "path": file.display().to_string(),
                    "stubs": edits.len(),
                    "written": write,
                });
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
            } else if write {
                eprintln!("{}: filled {} stub(s)", file.display(), edits.len());
            } else {
                print!("{}", source.text());
            }
        }
        Commands::Init { path } => {
            let dir = path.or(cli.root).unwrap_or_else(|| PathBuf::from("."));
            let target = dir.join(CONFIG_FILE_NAME);
            if target.exists() {
                fail(format!("{} already exists", target.display()));
            }
            let content = StubConfig::default().to_toml().unwrap_or_else(|e| fail(e));
            std::fs::write(&target, content)
                .unwrap_or_else(|e| fail(format!("Could not write {}: {e}", target.display())));
            println!("Created {}", target.display());
        }
    }
}
