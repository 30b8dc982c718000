use std::io::{BufRead, BufReader, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use json_vecsim::config::Config;
use json_vecsim::expression::{ColumnRef, Constant, Datum, Expression, Row};
use json_vecsim::{Coercion, build_function, evaluate_batch, registry};
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Cosine similarity and dot product over JSON numeric arrays
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Element coercion: strict (numbers only) or host (literals and numeric strings)
    #[arg(long, global = true)]
    coercion: Option<Coercion>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available functions
    Functions,
    /// Evaluate a function on two JSON literals
    Eval {
        function: String,
        left: String,
        right: String,
    },
    /// Evaluate a function over JSON Lines rows
    Rows {
        function: String,
        /// Key of the left argument in each row object
        #[arg(long)]
        left: String,
        /// Key of the right argument in each row object
        #[arg(long)]
        right: String,
        /// Input file (stdin when omitted)
        #[arg(long)]
        input: Option<std::path::PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(std::io::stderr).map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    if let Some(c) = args.coercion {
        config.functions.coercion = c;
    }

    // stdout carries results; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Functions => {
            for name in registry::function_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Eval {
            function,
            left,
            right,
        } => eval_literals(&config, &function, &left, &right),
        Command::Rows {
            function,
            left,
            right,
            input,
        } => {
            let reader: Box<dyn BufRead> = match &input {
                Some(path) => Box::new(BufReader::new(
                    std::fs::File::open(path)
                        .with_context(|| format!("opening {}", path.display()))?,
                )),
                None => Box::new(BufReader::new(std::io::stdin())),
            };
            let stdout = std::io::stdout();
            eval_rows(&config, &function, &left, &right, reader, &mut stdout.lock())
        }
    }
}

/// Config decides the final filter, so loading logs through a scoped subscriber
fn load_config<W>(writer: W) -> Result<Config>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("json_vecsim=warn"))
        .with_writer(writer)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(bootstrap, Config::load)
}

fn eval_literals(config: &Config, function: &str, left: &str, right: &str) -> Result<()> {
    let args: Vec<Arc<dyn Expression>> = vec![
        Arc::new(Constant::string(left)),
        Arc::new(Constant::string(right)),
    ];
    let func = build_function(function, args, config.functions.coercion)?;
    match func.eval_real(&Row::empty())? {
        Some(v) => println!("{}", v),
        None => println!("NULL"),
    }
    Ok(())
}

fn eval_rows(
    config: &Config,
    function: &str,
    left: &str,
    right: &str,
    reader: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let args: Vec<Arc<dyn Expression>> = vec![
        Arc::new(ColumnRef::json(left, 0)),
        Arc::new(ColumnRef::json(right, 1)),
    ];
    let func = build_function(function, args, config.functions.coercion)?;

    let mut rows = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let obj: Value =
            serde_json::from_str(&line).with_context(|| format!("parsing row {}", n + 1))?;
        rows.push(Row::new(vec![column(&obj, left), column(&obj, right)]));
    }
    info!("Evaluating {} over {} rows", func.name(), rows.len());

    let results = evaluate_batch(func.as_ref(), &rows, &config.batch);
    for (i, r) in results.iter().enumerate() {
        let line = match r {
            Ok(v) => json!({ "row": i, "result": (*v).map(result_value), "error": null }),
            Err(e) => json!({ "row": i, "result": null, "error": e.to_string() }),
        };
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// JSON has no NaN or infinity; those are written as strings so they never read as NULL
fn result_value(v: f64) -> Value {
    if v.is_nan() {
        json!("NaN")
    } else if v == f64::INFINITY {
        json!("inf")
    } else if v == f64::NEG_INFINITY {
        json!("-inf")
    } else {
        json!(v)
    }
}

/// Missing keys and JSON null are read as SQL NULL
fn column(obj: &Value, key: &str) -> Datum {
    match obj.get(key) {
        None | Some(Value::Null) => Datum::Null,
        Some(v) => Datum::Json(v.clone()),
    }
}
