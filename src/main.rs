use colored::{ColoredString, Colorize};
use std::{
  env, fmt,
  fs::File,
  io::{self, BufRead, BufReader, Write},
};

use crate::{
  evaluator::{EvaluationError, LineOutcome},
  state::State,
};

mod evaluator;
mod fraction;
mod numeric;
mod parser;
mod state;
mod tokenizer;

const DEFAULT_INPUT: &str = "fractions.txt";

fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::init();
  let args: Vec<String> = env::args().collect();
  if args.len() > 2 {
    print_usage(&args[0]);
    std::process::exit(1);
  }
  match args.get(1).map(String::as_str) {
    Some("--repl") => repl()?,
    Some("--help") | Some("-h") => print_usage(&args[0]),
    path => {
      let path = path.unwrap_or(DEFAULT_INPUT);
      if let Err(err) = run_batch(path) {
        log::error!("{}", err);
        eprintln!("{}", err.to_string().red());
        std::process::exit(1);
      }
    }
  }
  Ok(())
}

fn print_usage(program: &str) {
  eprintln!("Usage: {} [<file>|-|--repl]", program);
  eprintln!("Evaluates lines of the form '<a>/<b> <op> <c>/<d>' with op one of + - * /.");
  eprintln!("  <file>   Read records from a file (default: {})", DEFAULT_INPUT);
  eprintln!("  -        Read records from standard input");
  eprintln!("  --repl   Start interactive mode");
}

fn run_batch(path: &str) -> Result<State, RunError> {
  let reader: Box<dyn BufRead> = if path == "-" {
    Box::new(BufReader::new(io::stdin()))
  } else {
    let file = File::open(path).map_err(|err| RunError::ResourceUnavailable {
      input: path.to_owned(),
      reason: err.to_string(),
    })?;
    Box::new(BufReader::new(file))
  };
  log::debug!("Reading records from '{}'", path);
  let mut state = State::new();
  let stdout = io::stdout();
  let stderr = io::stderr();
  process_reader(path, reader, &mut stdout.lock(), &mut stderr.lock(), &mut state)?;
  log::info!("{}", state);
  if state.notices() > 0 {
    log::info!("{} of {} lines raised notices", state.notices(), state.lines_read());
  }
  Ok(state)
}

/// Evaluates every line of `reader`, writing each result to `out` before the
/// next line is read and each notice to `notices`. Lines are read as raw bytes
/// so a badly encoded record only skips itself.
fn process_reader<R: BufRead, O: Write, N: Write>(
  input: &str,
  mut reader: R,
  out: &mut O,
  notices: &mut N,
  state: &mut State,
) -> Result<(), RunError> {
  let mut raw = Vec::new();
  loop {
    raw.clear();
    let read = reader
      .read_until(b'\n', &mut raw)
      .map_err(|err| RunError::ResourceUnavailable {
        input: input.to_owned(),
        reason: err.to_string(),
      })?;
    if read == 0 {
      break;
    }
    let outcome = evaluator::process_bytes(&raw);
    state.record(&outcome);
    write_outcome(&outcome, out, notices).map_err(|err| RunError::Output(err.to_string()))?;
  }
  Ok(())
}

fn write_outcome<O: Write, N: Write>(
  outcome: &LineOutcome,
  out: &mut O,
  notices: &mut N,
) -> io::Result<()> {
  for notice in &outcome.notices {
    writeln!(notices, "{}", paint_notice(notice))?;
  }
  if let Some(output) = &outcome.output {
    writeln!(out, "{}", output)?;
  }
  out.flush()
}

// Yellow when the line still produced a result, red when it was skipped.
fn paint_notice(notice: &EvaluationError) -> ColoredString {
  let text = format!("ERROR! {}", notice);
  if notice.is_recoverable() {
    text.yellow()
  } else {
    text.red()
  }
}

fn repl() -> Result<(), Box<dyn std::error::Error>> {
  println!("Welcome to the fraction calculator!");
  println!("Enter a record like '1/2 + 1/3'. Operators: + - * /");
  println!("To run a file instead, pass the file path as the first argument.");
  println!("To exit, type 'exit' or 'quit'. 'clear' or 'reset' resets the tally.\n");
  let mut state = State::new();
  let mut execution_count = 1;
  loop {
    print!("{} >>> ", execution_count);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
      break;
    }
    let input = input.trim();
    if input == "exit" || input == "quit" {
      break;
    } else if input == "clear" || input == "reset" {
      state.clear();
      continue;
    }
    if input.is_empty() {
      continue;
    }
    let outcome = evaluator::process_line(input);
    state.record(&outcome);
    for notice in &outcome.notices {
      println!("{}", paint_notice(notice));
    }
    if let (Some(output), Some(result)) = (outcome.output, outcome.result) {
      let approximation = format!("(~ {})", result.to_f64()).dimmed();
      println!("{execution_count}: {} {}", output.bold(), approximation);
      execution_count += 1;
    }
  }
  println!(
    "Goodbye! {} evaluated, {} skipped.",
    state.evaluated(),
    state.skipped()
  );
  Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
  ResourceUnavailable { input: String, reason: String },
  Output(String),
}

impl fmt::Display for RunError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RunError::ResourceUnavailable { input, reason } => {
        write!(f, "Error opening '{}': {}", input, reason)
      }
      RunError::Output(reason) => write!(f, "Error writing output: {}", reason),
    }
  }
}

impl std::error::Error for RunError {}
