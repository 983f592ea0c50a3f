//! Loads query and input text from inline arguments, files, or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub fn load_query(text: Option<&str>, file: Option<&Path>) -> Result<String, String> {
    load("query", text, file)
        .and_then(|q| {
            if q.trim().is_empty() {
                Err("query cannot be empty".to_owned())
            } else {
                Ok(q)
            }
        })
}

pub fn load_input(text: Option<&str>, file: Option<&Path>) -> Result<String, String> {
    load("input text", text, file)
}

fn load(what: &str, text: Option<&str>, file: Option<&Path>) -> Result<String, String> {
    if let Some(text) = text {
        return Ok(text.to_owned());
    }

    if let Some(path) = file {
        if path.as_os_str() == "-" {
            return load_stdin();
        }
        return fs::read_to_string(path)
            .map_err(|e| format!("failed to read '{}': {}", path.display(), e));
    }

    Err(format!("{what} is required"))
}

fn load_stdin() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(buf)
}
