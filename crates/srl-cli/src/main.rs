mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Compile { query, json } => {
            commands::compile::run(commands::compile::CompileArgs {
                query_text: query.query_text,
                query_file: query.query_file,
                json,
            });
        }
        Command::Test { query, input } => {
            commands::test::run(commands::test::TestArgs {
                query_text: query.query_text,
                query_file: query.query_file,
                text: input.text,
                text_file: input.text_file,
            });
        }
        Command::Match { query, input, all, json } => {
            commands::matches::run(commands::matches::MatchArgs {
                query_text: query.query_text,
                query_file: query.query_file,
                text: input.text,
                text_file: input.text_file,
                all,
                json,
            });
        }
    }
}
