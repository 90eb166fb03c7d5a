use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use content_schema_catalog::{CatalogBuilder, CatalogService, EditorConfig};
use content_schema_core::{
    SchemaDraft, SelectOption, field_type_options, list_type_options, validate_draft,
};
use content_schema_editor::{EditEvent, EditorSettings, FieldAttribute, SchemaEditor};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Output format for structured command results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "schema-editor")]
#[command(about = "Headless content schema editor")]
struct Cli {
    /// Log reconciliation steps (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay an edit script and print the resulting draft.
    Apply(ApplyArgs),
    /// Validate one or more schema draft JSON files.
    Validate(ValidateArgs),
    /// List the known schemas and microschemas.
    Catalog(CatalogArgs),
    /// Print the selectable field types.
    FieldTypes(FieldTypesArgs),
}

#[derive(Debug, Args)]
struct ApplyArgs {
    /// JSON or YAML list of edit events.
    #[arg(long)]
    script: PathBuf,
    /// Existing schema draft JSON to start from.
    #[arg(long)]
    draft: Option<PathBuf>,
    /// Path to editor config YAML.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Draft files and/or directories containing draft JSON files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct CatalogArgs {
    /// Catalog directory with schemas/ and microschemas/.
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Catalog bundle JSON file.
    #[arg(long)]
    bundle: Option<PathBuf>,
    /// Path to editor config YAML (used when no source is given).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format (default: one name per line).
    #[arg(long)]
    format: Option<CliOutputFormat>,
}

#[derive(Debug, Args)]
struct FieldTypesArgs {
    /// Print the list item types instead.
    #[arg(long)]
    list: bool,
}

/// Result of an `apply` run.
#[derive(Debug, Serialize)]
struct SessionReport<'a> {
    draft: &'a SchemaDraft,
    valid: bool,
    display_fields: &'a [SelectOption],
    duplicates: Vec<DuplicateRow>,
    errors: Vec<String>,
}

#[derive(Debug, Serialize)]
struct DuplicateRow {
    index: usize,
    name: bool,
    label: bool,
}

#[derive(Debug, Serialize)]
struct CatalogListing {
    schemas: Vec<String>,
    microschemas: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Apply(args) => run_apply(args),
        Command::Validate(args) => run_validate(args),
        Command::Catalog(args) => run_catalog(args),
        Command::FieldTypes(args) => run_field_types(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_apply(args: ApplyArgs) -> Result<(), String> {
    let settings = match &args.config {
        Some(path) => EditorConfig::load(path).map_err(|e| e.to_string())?.editor,
        None => EditorSettings::default(),
    };

    let raw = fs::read_to_string(&args.script)
        .map_err(|e| format!("failed to read {}: {e}", args.script.display()))?;
    // YAML is a superset of JSON, so one parser handles both script flavors
    let events: Vec<EditEvent> = serde_yaml::from_str(&raw)
        .map_err(|e| format!("invalid script {}: {e}", args.script.display()))?;

    let mut editor = match &args.draft {
        Some(path) => SchemaEditor::for_draft(&read_draft(path)?),
        None => SchemaEditor::with_settings(&settings),
    };

    for (position, event) in events.into_iter().enumerate() {
        debug!(position, event = ?event, "applying event");
        editor
            .apply(event)
            .map_err(|e| format!("event {}: {e}", position + 1))?;
    }

    let duplicates = (0..editor.form().row_count())
        .map(|index| DuplicateRow {
            index,
            name: editor.field_has_duplicate_value(index, FieldAttribute::Name),
            label: editor.field_has_duplicate_value(index, FieldAttribute::Label),
        })
        .filter(|row| row.name || row.label)
        .collect();

    let report = SessionReport {
        draft: editor.draft(),
        valid: editor.is_valid(),
        display_fields: editor.display_fields(),
        duplicates,
        errors: editor
            .validation_errors()
            .iter()
            .map(ToString::to_string)
            .collect(),
    };
    print_structured(&report, args.format)?;
    editor.close();
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let paths = collect_draft_paths(&args.inputs)?;
    let mut invalid = 0usize;

    for path in &paths {
        let draft = read_draft(path)?;
        let errors = validate_draft(&draft);
        if errors.is_empty() {
            continue;
        }
        invalid += 1;
        eprintln!("{}:", path.display());
        for err in errors {
            eprintln!("  {err}");
        }
    }

    if invalid > 0 {
        return Err(format!("{invalid} of {} draft(s) invalid", paths.len()));
    }
    println!("Validated {} draft file(s).", paths.len());
    Ok(())
}

fn run_catalog(args: CatalogArgs) -> Result<(), String> {
    let mut builder = CatalogBuilder::new();
    if let Some(dir) = args.dir {
        builder = builder.from_dir(dir);
    }
    if let Some(bundle) = args.bundle {
        builder = builder.from_bundle(bundle);
    }
    if builder.is_empty() {
        if let Some(path) = &args.config {
            builder = EditorConfig::load(path)
                .map_err(|e| e.to_string())?
                .catalog
                .builder();
        }
    }
    if builder.is_empty() {
        return Err("no catalog source given (use --dir, --bundle or --config)".into());
    }

    let catalog = builder.build().map_err(|e| e.to_string())?;
    info!(
        schemas = catalog.schema_count(),
        microschemas = catalog.microschema_count(),
        "catalog loaded"
    );

    let service = CatalogService::from_catalog(&catalog);
    let editor = SchemaEditor::new();
    let listing = CatalogListing {
        schemas: editor
            .all_schemas(&service)
            .into_iter()
            .map(|s| s.name)
            .collect(),
        microschemas: editor
            .all_microschemas(&service)
            .into_iter()
            .map(|s| s.name)
            .collect(),
    };

    match args.format {
        Some(format) => print_structured(&listing, format)?,
        None => {
            println!("schemas:");
            for name in &listing.schemas {
                println!("  {name}");
            }
            println!("microschemas:");
            for name in &listing.microschemas {
                println!("  {name}");
            }
        }
    }
    Ok(())
}

fn run_field_types(args: FieldTypesArgs) -> Result<(), String> {
    let options = if args.list {
        list_type_options()
    } else {
        field_type_options()
    };
    for option in options {
        println!("{:<10} {}", option.value, option.label);
    }
    Ok(())
}

fn read_draft(path: &Path) -> Result<SchemaDraft, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| format!("invalid draft {}: {e}", path.display()))
}

fn collect_draft_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let entries = fs::read_dir(input)
                .map_err(|e| format!("failed to read {}: {e}", input.display()))?;
            let mut found: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
                .collect();
            found.sort();
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }
    if paths.is_empty() {
        return Err("no draft files found".into());
    }
    Ok(paths)
}

fn print_structured<T: Serialize>(value: &T, format: CliOutputFormat) -> Result<(), String> {
    let rendered = match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string())?,
        CliOutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string())?,
    };
    println!("{rendered}");
    Ok(())
}
