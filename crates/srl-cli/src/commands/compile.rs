//! Compile a query and print the generated expression.

use std::path::PathBuf;

use srl_lib::srl;

use super::loader::load_query;

pub struct CompileArgs {
    pub query_text: Option<String>,
    pub query_file: Option<PathBuf>,
    pub json: bool,
}

pub fn run(args: CompileArgs) {
    let query = match load_query(args.query_text.as_deref(), args.query_file.as_deref()) {
        Ok(query) => query,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let mut builder = match srl(&query) {
        Ok(builder) => builder,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let expr = match builder.compile() {
        Ok(expr) => expr,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        let out = serde_json::json!({
            "pattern": expr.pattern(),
            "modifiers": expr.modifiers(),
        });
        println!("{}", out);
    } else {
        println!("/{}/{}", expr.pattern(), expr.modifiers());
    }
}
