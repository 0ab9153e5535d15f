use clap::{Args, Parser as ClapParser, Subcommand};
use std::{
    io::{self, Read},
    path::PathBuf,
};
use tql_dsel::{
    ConversionMode,
    cli::{
        self, CheckOptions, CliError, EvalOptions, EvalResult, ToDselOptions, ToTqlOptions,
    },
};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "tqldsel")]
#[command(about = "Convert record filters between TQL and DSEL, and evaluate them against JSON")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the syntax of a TQL query and print its normalized form
    Check {
        /// The TQL query to check
        query: String,
    },

    /// Convert a TQL query to a DSEL expression
    ToDsel {
        /// The TQL query to convert
        query: String,

        #[command(flatten)]
        conversion: ConversionArgs,

        /// Print the whole expression on one line
        #[arg(long)]
        compact: bool,

        /// Indentation unit for multi-line output
        #[arg(long, default_value = "  ")]
        indent: String,
    },

    /// Convert a DSEL expression to a TQL query
    ToTql {
        /// The DSEL expression to convert
        expression: String,
    },

    /// Evaluate a filter against a JSON record or array of records
    Eval {
        /// The filter, TQL unless --dsel is given
        filter: String,

        /// The filter is a DSEL expression
        #[arg(long)]
        dsel: bool,

        #[command(flatten)]
        conversion: ConversionArgs,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[derive(Args)]
struct ConversionArgs {
    /// Emit data-evaluation shapes instead of query-level ones
    #[arg(long)]
    runtime: bool,

    /// Declare a field type, as name=TYPE (repeatable, in field order)
    #[arg(short, long = "field", value_name = "NAME=TYPE")]
    fields: Vec<String>,

    /// JSON object of field types, in field order
    #[arg(long, value_name = "FILE")]
    field_types: Option<PathBuf>,
}

impl ConversionArgs {
    fn mode(&self) -> ConversionMode {
        if self.runtime {
            ConversionMode::Runtime
        } else {
            ConversionMode::Db
        }
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { query } => cli::execute_check(&CheckOptions { query }).map(|normalized| {
            println!("{}", normalized);
        }),
        Commands::ToDsel {
            query,
            conversion,
            compact,
            indent,
        } => run_to_dsel(query, conversion, compact, indent),
        Commands::ToTql { expression } => {
            cli::execute_to_tql(&ToTqlOptions { expression }).map(|query| {
                println!("{}", query);
            })
        }
        Commands::Eval {
            filter,
            dsel,
            conversion,
            input,
            pretty,
        } => run_eval(filter, dsel, conversion, input, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn run_to_dsel(
    query: String,
    conversion: ConversionArgs,
    compact: bool,
    indent: String,
) -> Result<(), CliError> {
    let options = ToDselOptions {
        query,
        mode: conversion.mode(),
        field_types: cli::field_types_from_args(&conversion.fields, conversion.field_types.as_deref())?,
        compact,
        indent,
    };
    println!("{}", cli::execute_to_dsel(&options)?);
    Ok(())
}

fn run_eval(
    filter: String,
    dsel: bool,
    conversion: ConversionArgs,
    input: Option<String>,
    pretty: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = EvalOptions {
        filter,
        dsel,
        mode: conversion.mode(),
        field_types: cli::field_types_from_args(&conversion.fields, conversion.field_types.as_deref())?,
        input,
    };

    match cli::execute_eval(&options)? {
        EvalResult::Record(matched) => println!("{}", matched),
        EvalResult::Matches(records) => {
            let json = if pretty {
                serde_json::to_string_pretty(&records)
            } else {
                serde_json::to_string(&records)
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}
