//! Command-line interface for redex
//! This binary exercises the grammar toolkit on files and ad-hoc input.
//!
//! Usage:
//!   redex tokenize `<path>` -d NAME=PATTERN... [--format `<format>`]  - Tokenize a file with ad-hoc definitions
//!   redex eval `<expression>` [--ref name=value]... [--trace]       - Evaluate an arithmetic expression
//!   redex convert `<path>` [--format `<format>`]                      - Convert protobuf debug text to JSON

use clap::{Arg, ArgAction, Command};
use redex::grammars::{expression, prototext};
use redex::parsing::ParseOptions;
use redex::tokenizing::{TokenDefinition, Tokenizer};
use std::collections::HashMap;

fn main() {
    let matches = Command::new("redex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A regex-driven tokenizer and rule-reduction grammar engine")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokenize")
                .about("Tokenize a file with ad-hoc token definitions")
                .arg(
                    Arg::new("path")
                        .help("Path to the file to tokenize")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("definition")
                        .long("definition")
                        .short('d')
                        .action(ArgAction::Append)
                        .required(true)
                        .help("Token definition as NAME=PATTERN (repeatable)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json' or 'yaml')")
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("eval")
                .about("Evaluate an arithmetic expression")
                .arg(
                    Arg::new("expression")
                        .help("The expression to evaluate")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("ref")
                        .long("ref")
                        .action(ArgAction::Append)
                        .help("Reference value as name=value (repeatable)"),
                )
                .arg(
                    Arg::new("trace")
                        .long("trace")
                        .action(ArgAction::SetTrue)
                        .help("Print every reduction decision to stderr"),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert protobuf debug text to JSON")
                .arg(
                    Arg::new("path")
                        .help("Path to the message text file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json' or 'yaml')")
                        .default_value("json"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("tokenize", tokenize_matches)) => {
            let path = tokenize_matches.get_one::<String>("path").unwrap();
            let definitions: Vec<String> = tokenize_matches
                .get_many::<String>("definition")
                .unwrap()
                .cloned()
                .collect();
            let format = tokenize_matches.get_one::<String>("format").unwrap();
            handle_tokenize_command(path, &definitions, format);
        }
        Some(("eval", eval_matches)) => {
            let expression = eval_matches.get_one::<String>("expression").unwrap();
            let references: Vec<String> = eval_matches
                .get_many::<String>("ref")
                .unwrap_or_default()
                .cloned()
                .collect();
            let trace = eval_matches.get_flag("trace");
            handle_eval_command(expression, &references, trace);
        }
        Some(("convert", convert_matches)) => {
            let path = convert_matches.get_one::<String>("path").unwrap();
            let format = convert_matches.get_one::<String>("format").unwrap();
            handle_convert_command(path, format);
        }
        _ => unreachable!(),
    }
}

fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

fn serialize<T: serde::Serialize>(value: &T, format: &str) -> String {
    match format {
        "yaml" => serde_yaml::to_string(value).unwrap_or_else(|e| {
            eprintln!("Serialization error: {}", e);
            std::process::exit(1);
        }),
        _ => serde_json::to_string_pretty(value).unwrap_or_else(|e| {
            eprintln!("Serialization error: {}", e);
            std::process::exit(1);
        }),
    }
}

/// Handle the tokenize command
fn handle_tokenize_command(path: &str, definitions: &[String], format: &str) {
    let mut parsed = Vec::new();
    for definition in definitions {
        let Some((name, pattern)) = definition.split_once('=') else {
            eprintln!("Invalid definition (expected NAME=PATTERN): {}", definition);
            std::process::exit(1);
        };
        match TokenDefinition::new(name, pattern) {
            Ok(definition) => parsed.push(definition),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    let tokenizer = Tokenizer::new(parsed);
    let source = read_file(path);
    match tokenizer.tokenize(&source) {
        Ok(tokens) => print!("{}", serialize(&tokens, format)),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the eval command
fn handle_eval_command(expression: &str, references: &[String], trace: bool) {
    let mut table = HashMap::new();
    for reference in references {
        let parsed = reference
            .split_once('=')
            .and_then(|(name, value)| Some((name, value.parse::<i64>().ok()?)));
        let Some((name, value)) = parsed else {
            eprintln!("Invalid reference (expected name=value): {}", reference);
            std::process::exit(1);
        };
        table.insert(name.to_string(), value);
    }

    let evaluator = expression::Evaluator::new(table);
    let mut sink = |line: &str| eprintln!("{}", line);
    let options = if trace {
        ParseOptions::with_trace(&mut sink)
    } else {
        ParseOptions::default()
    };
    match evaluator.evaluate_with(options, expression) {
        Ok(result) => println!("{}", result),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(path: &str, format: &str) {
    let converter = prototext::Converter::new();
    let source = read_file(path);
    match converter.to_json(&source) {
        Ok(value) => print!("{}", serialize(&value, format)),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
