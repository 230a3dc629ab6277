//! CLI wrapper around the calculator and JSON demo grammars.
//!
//! Peripheral to the library itself — a thin `argh` front end over the
//! `demos/` grammars, in the spirit of the teacher's `eb` subcommand CLI.

use argh::FromArgs;

#[path = "../../demos/calculator.rs"]
mod calculator;
#[path = "../../demos/json.rs"]
mod json;

use synthax::render::render;
use synthax::trace::{set_trace_level, TraceLevel};
use synthax::{apply, ApplyOptions};

#[derive(FromArgs)]
/// Demo grammars built on the synthax parser-combinator core
struct Args {
    #[argh(subcommand)]
    subcommand: Subcommand,

    /// verbosity: off, basic, detailed, trace
    #[argh(option, short = 'v', default = "String::from(\"off\")")]
    verbose: String,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Subcommand {
    Calc(CalcArgs),
    Json(JsonArgs),
}

#[derive(FromArgs)]
/// evaluate an arithmetic expression
#[argh(subcommand, name = "calc")]
struct CalcArgs {
    #[argh(positional)]
    expr: String,
}

#[derive(FromArgs)]
/// parse a JSON document and print its reduction
#[argh(subcommand, name = "json")]
struct JsonArgs {
    #[argh(positional)]
    input: String,
}

fn main() {
    let args: Args = argh::from_env();
    let level = TraceLevel::from_str(&args.verbose).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    set_trace_level(level);

    match args.subcommand {
        Subcommand::Calc(CalcArgs { expr }) => match calculator::run(&expr) {
            Ok(value) => println!("{value}"),
            Err(e) => {
                let rule = calculator::grammar();
                if let Err(err) = apply(&expr, &rule, &ApplyOptions::default()) {
                    eprintln!("{}", render(&expr, &err));
                } else {
                    eprintln!("{e}");
                }
                std::process::exit(1);
            }
        },
        Subcommand::Json(JsonArgs { input }) => match json::parse(&input) {
            Ok(value) => println!("{value:?}"),
            Err(e) => {
                let rule = json::grammar();
                if let Err(err) = apply(&input, &rule, &ApplyOptions::default()) {
                    eprintln!("{}", render(&input, &err));
                } else {
                    eprintln!("{e}");
                }
                std::process::exit(1);
            }
        },
    }
}
