//! oracdc-typemap CLI - Oracle type mapping and value binding for CDC pipelines.

use clap::{Parser, Subcommand};
use oracdc_typemap::schema::emit_field;
use oracdc_typemap::{
    CatalogColumn, ColumnDefinition, Config, EmitTarget, FieldSchema, KeyValueBuilders,
    NumericPolicy, ParameterBuffer, Row, TableDefinition, TypeMapError,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

const DEFAULT_CONFIG: &str = "config.yaml";

#[derive(Parser)]
#[command(name = "oracdc-typemap")]
#[command(about = "Oracle type mapping and value binding for CDC pipelines")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single column type and show both schema renderings
    Classify {
        /// Oracle data type name, e.g. NUMBER or TIMESTAMP(6)
        #[arg(long)]
        data_type: String,

        /// Numeric precision (omit for an unconstrained column)
        #[arg(long, allow_negative_numbers = true)]
        precision: Option<i32>,

        /// Numeric scale (omit for an unconstrained column)
        #[arg(long, allow_negative_numbers = true)]
        scale: Option<i32>,

        /// Column allows NULL
        #[arg(long)]
        nullable: bool,

        /// Column is part of the primary key
        #[arg(long)]
        pk: bool,

        /// Column name used in the emitted schemas
        #[arg(long, default_value = "COLUMN")]
        name: String,

        /// Override the configured numeric policy: schema_builder or standalone
        #[arg(long)]
        policy: Option<NumericPolicy>,
    },

    /// Discover a table from catalog rows (YAML or JSON array)
    Discover {
        /// Catalog rows file
        #[arg(long)]
        catalog: PathBuf,

        /// Table owner
        #[arg(long)]
        owner: String,

        /// Table name
        #[arg(long)]
        table: String,
    },

    /// Rebuild columns from self-describing field schemas (JSON array)
    Reverse {
        /// Field schemas file
        #[arg(long)]
        schema: PathBuf,

        /// Primary key column (repeatable)
        #[arg(long)]
        pk: Vec<String>,

        /// Table owner
        #[arg(long, default_value = "SINK")]
        owner: String,

        /// Table name
        #[arg(long, default_value = "TABLE")]
        table: String,
    },

    /// Bind a JSON row against a discovered table
    Bind {
        /// Catalog rows file
        #[arg(long)]
        catalog: PathBuf,

        /// Table owner
        #[arg(long)]
        owner: String,

        /// Table name
        #[arg(long)]
        table: String,

        /// JSON object with one entry per column
        #[arg(long)]
        row: PathBuf,

        /// Print bound parameters as JSON instead of an INSERT statement
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    column: &'a ColumnDefinition,
    wire_type: String,
    key_schema: oracdc_typemap::ConnectSchema,
    value_schema: oracdc_typemap::ConnectSchema,
    field_schema: FieldSchema,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), TypeMapError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(TypeMapError::Config)?;

    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Classify {
            data_type,
            precision,
            scale,
            nullable,
            pk,
            name,
            policy,
        } => {
            let mut row =
                CatalogColumn::new(name.clone(), data_type).with_precision(precision, scale);
            if !nullable {
                row = row.not_null();
            }
            if pk {
                row = row.primary_key();
            }
            let policy = policy.unwrap_or(config.classifier.numeric_policy);

            let mut builders = KeyValueBuilders::new(&format!(
                "{}{}",
                config.schema.topic_prefix, name
            ));
            let column =
                ColumnDefinition::discover(&row, policy, EmitTarget::Connect(&mut builders));
            let (key_schema, value_schema) = builders.build();

            let output = ClassifyOutput {
                column: &column,
                wire_type: column.wire_type().to_string(),
                key_schema,
                value_schema,
                field_schema: emit_field(&column),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Discover {
            catalog,
            owner,
            table,
        } => {
            let table = discover_table(&config, &catalog, &owner, &table)?;
            println!("{}", serde_json::to_string_pretty(&table)?);
        }

        Commands::Reverse {
            schema,
            pk,
            owner,
            table,
        } => {
            let content = std::fs::read_to_string(&schema)?;
            let schemas: Vec<FieldSchema> = serde_json::from_str(&content)?;
            debug!("Read {} field schemas from {:?}", schemas.len(), schema);
            let table = TableDefinition::from_field_schemas(&owner, &table, schemas, &pk)?;
            println!("{}", serde_json::to_string_pretty(&table.columns)?);
        }

        Commands::Bind {
            catalog,
            owner,
            table,
            row,
            json,
        } => {
            let table = discover_table(&config, &catalog, &owner, &table)?;
            let content = std::fs::read_to_string(&row)?;
            let value: serde_json::Value = serde_json::from_str(&content)?;
            let row = Row::from_json(&table.columns, &value)?;

            let mut buffer = ParameterBuffer::new();
            let bound = table.bind_row(&row, &mut buffer)?;
            info!("Bound {} parameters for {}", bound, table.full_name());

            if json {
                println!("{}", serde_json::to_string_pretty(&buffer.to_json()?)?);
            } else {
                let names: Vec<&str> = table
                    .write_columns()
                    .into_iter()
                    .map(ColumnDefinition::name)
                    .collect();
                println!("{}", buffer.insert_sql(&table.owner, &table.table, &names));
            }
        }
    }

    Ok(())
}

/// Load the configuration file. A missing default file means defaults.
fn load_config(path: &Path) -> Result<Config, TypeMapError> {
    if path == Path::new(DEFAULT_CONFIG) && !path.exists() {
        debug!("No {} found, using default configuration", DEFAULT_CONFIG);
        return Ok(Config::default());
    }
    let config = Config::load(path)?;
    info!("Loaded configuration from {:?}", path);
    Ok(config)
}

fn discover_table(
    config: &Config,
    catalog: &Path,
    owner: &str,
    table: &str,
) -> Result<TableDefinition, TypeMapError> {
    let content = std::fs::read_to_string(catalog)?;
    let rows: Vec<CatalogColumn> = serde_yaml::from_str(&content)?;
    TableDefinition::discover(owner, table, rows, &config.discovery_options())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries command output
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("unknown log format '{}', expected text or json", other)),
    }

    Ok(())
}
