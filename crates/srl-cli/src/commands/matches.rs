//! Print the matches of a query against input text.

use std::path::PathBuf;

use srl_lib::{MatchRecord, srl};

use super::loader::{load_input, load_query};

pub struct MatchArgs {
    pub query_text: Option<String>,
    pub query_file: Option<PathBuf>,
    pub text: Option<String>,
    pub text_file: Option<PathBuf>,
    pub all: bool,
    pub json: bool,
}

pub fn run(args: MatchArgs) {
    let query = match load_query(args.query_text.as_deref(), args.query_file.as_deref()) {
        Ok(query) => query,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let text = match load_input(args.text.as_deref(), args.text_file.as_deref()) {
        Ok(text) => text,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let records = match collect(&query, &text, args.all) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&records) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if records.is_empty() {
        println!("no match");
        return;
    }

    for record in records {
        println!("{}", record.text);
        for (i, group) in record.groups.iter().enumerate() {
            println!("  {}: {}", i + 1, group);
        }
        for (name, group) in &record.named {
            println!("  {}: {}", name, group);
        }
    }
}

fn collect(query: &str, text: &str, all: bool) -> srl_lib::Result<Vec<MatchRecord>> {
    let mut builder = srl(query)?;
    if all {
        builder.all_matches(text)
    } else {
        Ok(builder.first_match(text)?.into_iter().collect())
    }
}
