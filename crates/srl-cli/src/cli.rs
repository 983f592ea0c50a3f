use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "srl", bin_name = "srl")]
#[command(about = "Build regular expressions from readable phrases")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile a query and print the generated expression
    #[command(after_help = r#"EXAMPLES:
  srl compile -q 'begin with literally "http", must end'
  srl compile --query-file query.srl --json
  echo 'digit once or more' | srl compile --query-file -"#)]
    Compile {
        #[command(flatten)]
        query: QueryArgs,

        /// Emit the expression as JSON
        #[arg(long)]
        json: bool,
    },

    /// Test whether input text matches a query (exit code 1 on no match)
    #[command(after_help = r#"EXAMPLES:
  srl test -q 'digit exactly 5 times' --text 12345
  srl test --query-file query.srl --text-file input.txt"#)]
    Test {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the matches of a query against input text
    #[command(after_help = r#"EXAMPLES:
  srl match -q 'capture (letter once or more) as word' --text 'one two' --all
  srl match --query-file query.srl --text-file input.txt --json"#)]
    Match {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        input: InputArgs,

        /// Report every match instead of the first
        #[arg(long)]
        all: bool,

        /// Emit matches as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
#[group(id = "query_input", multiple = false)]
pub struct QueryArgs {
    /// Query as inline text
    #[arg(short = 'q', long = "query", value_name = "QUERY")]
    pub query_text: Option<String>,

    /// Query from file (use "-" for stdin)
    #[arg(long = "query-file", value_name = "FILE")]
    pub query_file: Option<PathBuf>,
}

#[derive(Args)]
#[group(id = "text_input", multiple = false)]
pub struct InputArgs {
    /// Input text as inline text
    #[arg(long = "text", value_name = "TEXT")]
    pub text: Option<String>,

    /// Input text from file (use "-" for stdin)
    #[arg(long = "text-file", value_name = "FILE")]
    pub text_file: Option<PathBuf>,
}
