use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use typeflow::editor::graph_from_json;
use typeflow::prelude::*;

/// Compiles type-level transformation graphs into importable source text
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the graph JSON file (canonical or editor format)
    graph_path: Option<String>,

    /// Name of the combined result alias
    #[arg(short, long, default_value = "")]
    name: String,

    /// Write the generated source to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Path to a compiler options JSON file
    #[arg(long)]
    options: Option<String>,

    /// Path to a JSON array of additional operation signatures
    #[arg(long)]
    registry: Option<String>,

    /// Exit with a non-zero status when validation reports problems
    #[arg(long)]
    strict: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

struct RunSettings {
    graph_path: String,
    name: String,
    output: Option<String>,
    options_path: Option<String>,
    registry_path: Option<String>,
    strict: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = if cli.human {
        prompt_settings()
    } else {
        settings_from_cli(cli)
    };
    run_compilation(settings);
}

fn run_compilation(settings: RunSettings) {
    let total_start = Instant::now();

    // --- 1. Configuration ---
    let config_start = Instant::now();
    let options = match &settings.options_path {
        Some(path) => CompilerOptions::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load options: {}", e))),
        None => CompilerOptions::default(),
    };
    let mut registry = OperationRegistry::with_defaults();
    if let Some(path) = &settings.registry_path {
        let added = registry
            .extend_from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load registry: {}", e)));
        eprintln!("Registered {} additional operations from '{}'", added, path);
    }
    let compiler = Compiler::builder()
        .with_options(options)
        .with_registry(registry)
        .build();
    let config_duration = config_start.elapsed();

    // --- 2. Graph Loading ---
    let load_start = Instant::now();
    let graph_json = fs::read_to_string(&settings.graph_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read graph file '{}': {}",
            &settings.graph_path, e
        ))
    });
    let graph = graph_from_json(&graph_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load graph: {}", e)));
    let load_duration = load_start.elapsed();

    // --- 3. Validation ---
    let validate_start = Instant::now();
    let problems = compiler.validate(&graph);
    let validate_duration = validate_start.elapsed();

    if problems.is_empty() {
        eprintln!("Validation passed.");
    } else {
        eprintln!("Validation reported {} problem(s):", problems.len());
        for problem in &problems {
            eprintln!("  - {}", problem);
        }
    }

    // --- 4. Generation ---
    let generate_start = Instant::now();
    let artifacts = compiler.compile(&graph, &settings.name);
    let generate_duration = generate_start.elapsed();

    match &settings.output {
        Some(path) => {
            fs::write(path, &artifacts.source).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write output file '{}': {}", path, e))
            });
            eprintln!("Wrote generated source to '{}'", path);
        }
        None => println!("{}", artifacts.source),
    }

    // --- 5. Summary ---
    let total_duration = total_start.elapsed();
    eprintln!("\n--- Graph Summary ---");
    eprintln!("Nodes:        {}", graph.nodes.len());
    eprintln!("Edges:        {}", graph.edges.len());
    eprintln!("Components:   {}", artifacts.components.len());
    eprintln!("Imports:      {}", artifacts.imports.join(", "));

    eprintln!("\n--- Performance Summary ---");
    eprintln!("Configuration:  {:?}", config_duration);
    eprintln!("Graph Loading:  {:?}", load_duration);
    eprintln!("Validation:     {:?}", validate_duration);
    eprintln!("Generation:     {:?}", generate_duration);
    eprintln!("-----------------------------");
    eprintln!("Total:          {:?}", total_duration);

    if settings.strict && !problems.is_empty() {
        std::process::exit(2);
    }
}

fn settings_from_cli(cli: Cli) -> RunSettings {
    let graph_path = cli.graph_path.unwrap_or_else(|| {
        exit_with_error("Graph path is required in non-interactive mode.");
    });
    RunSettings {
        graph_path,
        name: cli.name,
        output: cli.output,
        options_path: cli.options,
        registry_path: cli.registry,
        strict: cli.strict,
    }
}

/// Asks for every setting with a prompt.
fn prompt_settings() -> RunSettings {
    println!("--- typeflow Interactive Mode ---");

    let graph_path = prompt_for_input("Enter graph path", Some("data/graph.json"));
    let name = prompt_for_input("Enter result alias (optional)", None);
    let output = non_empty(prompt_for_input("Enter output path (optional)", None));
    let options_path = non_empty(prompt_for_input("Enter options path (optional)", None));
    let registry_path = non_empty(prompt_for_input("Enter registry path (optional)", None));

    let strict = loop {
        let choice = prompt_for_input("Fail on validation problems? (y/n)", Some("n"));
        match choice.to_lowercase().as_str() {
            "y" | "yes" => break true,
            "n" | "no" => break false,
            _ => println!("Invalid choice. Please enter y or n."),
        }
    };

    RunSettings {
        graph_path,
        name,
        output,
        options_path,
        registry_path,
        strict,
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to flush stdout: {}", e));
    }
    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
