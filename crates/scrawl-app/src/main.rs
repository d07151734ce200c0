use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Run a scrawl script and print its output and the rendered grid, or
/// evaluate a single expression with `--eval`.
#[derive(Parser)]
#[command(name = "scrawl", version, about)]
struct Args {
    /// Script file to run.
    #[arg(required_unless_present = "eval")]
    script: Option<PathBuf>,

    /// Evaluate one arithmetic expression and print the result.
    #[arg(long, value_name = "EXPR", conflicts_with = "script")]
    eval: Option<String>,

    /// Grid width in characters.
    #[arg(long, default_value_t = scrawl_render::DEFAULT_WIDTH)]
    width: usize,

    /// Grid height in characters.
    #[arg(long, default_value_t = scrawl_render::DEFAULT_HEIGHT)]
    height: usize,

    /// Print the statement output only, without the rendered grid.
    #[arg(long)]
    no_render: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    if let Some(expr) = &args.eval {
        let value = scrawl_lang::eval_line(expr).map_err(|e| e.to_string())?;
        println!("{value}");
        return Ok(());
    }

    let Some(path) = &args.script else {
        return Err("no script file given".to_string());
    };
    let source = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    let outcome = scrawl_lang::interpret(&source).map_err(|e| e.to_string())?;
    for line in &outcome.output {
        println!("{line}");
    }

    if !args.no_render {
        let grid = scrawl_render::render(&outcome.shapes, args.width, args.height);
        println!("{grid}");
    }
    Ok(())
}
