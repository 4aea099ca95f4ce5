use anyhow::{Context, Result};
use binsum::{
    render, EvalError, Evaluator, ExpressionLoader, Grammar, Halt, Step, Sum, TuringMachine,
};
use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  binsum-cli 10+101=
  binsum-cli --general 11+10=
  echo 10+1= | binsum-cli --json")]
struct Cli {
    /// Expressions to evaluate, such as `10+101=`
    expressions: Vec<String>,

    /// Read expressions from a file, one per line
    #[clap(short, long)]
    file: Option<PathBuf>,

    /// Accept any binary first operand instead of only `10`
    #[clap(short, long)]
    general: bool,

    /// Print one JSON object per expression
    #[clap(short, long)]
    json: bool,

    /// Print each step of the recognizer
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the active transition table and exit
    #[clap(short, long)]
    table: bool,
}

/// The machine-readable form of one evaluation.
#[derive(Serialize)]
struct Report<'a> {
    input: &'a str,
    outcome: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    binary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decimal: Option<String>,
}

impl<'a> Report<'a> {
    fn new(input: &'a str, result: &Result<Sum, EvalError>) -> Self {
        let outcome = match result {
            Ok(_) => "accepted",
            Err(EvalError::EmptyInput) => "empty",
            Err(EvalError::Rejected(_)) => "rejected",
            Err(EvalError::Decode(_)) => "decode_failure",
        };

        Self {
            input,
            outcome,
            message: render(result),
            binary: result.as_ref().ok().map(|sum| sum.binary.clone()),
            decimal: result.as_ref().ok().map(|sum| sum.decimal.to_string()),
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let grammar = cli.grammar();

    if cli.table {
        print!("{}", grammar.table());
        return Ok(());
    }

    let stdin = io::stdin();
    let piped = atty::isnt(atty::Stream::Stdin).then(|| stdin.lock());
    let inputs = collect_inputs(cli, piped)?;

    let evaluator = Evaluator::new(grammar);
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    for input in &inputs {
        report(cli, &evaluator, input, &mut stdout, &mut stderr)?;
    }

    Ok(())
}

impl Cli {
    fn grammar(&self) -> Grammar {
        if self.general {
            Grammar::General
        } else {
            Grammar::Standard
        }
    }
}

/// Gathers expressions from arguments, then `--file`, then `stdin` when nothing else was given.
///
/// With nothing supplied, a single empty expression is returned so the user
/// gets the usual prompt.
fn collect_inputs<R: BufRead>(cli: &Cli, stdin: Option<R>) -> Result<Vec<String>> {
    let mut inputs = cli.expressions.clone();

    if let Some(path) = &cli.file {
        let loaded = ExpressionLoader::load_file(path)
            .with_context(|| format!("failed to load expressions from {}", path.display()))?;
        inputs.extend(loaded);
    }

    if let Some(stdin) = stdin.filter(|_| inputs.is_empty()) {
        let mut content = String::new();
        for line in stdin.lines() {
            let line = line.context("failed to read from stdin")?;
            content.push_str(&line);
            content.push('\n');
        }
        inputs.extend(ExpressionLoader::load_from_string(&content));
    }

    if inputs.is_empty() {
        inputs.push(String::new());
    }

    Ok(inputs)
}

/// Evaluates one expression and writes its result line to `out`.
///
/// With `--debug`, the step trace goes to `trace`. Empty input is never traced:
/// it is turned away before the recognizer runs.
fn report<W: Write, T: Write>(
    cli: &Cli,
    evaluator: &Evaluator,
    input: &str,
    out: &mut W,
    trace: &mut T,
) -> Result<()> {
    if cli.debug && !input.is_empty() {
        trace_run(evaluator.grammar, input, trace).context("failed to write trace")?;
    }

    let result = evaluator.submit(input);

    if cli.json {
        serde_json::to_writer(&mut *out, &Report::new(input, &result))
            .context("failed to serialize report")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", render(&result))?;
    }

    Ok(())
}

/// Steps the recognizer by hand, printing every configuration to `out`.
fn trace_run<W: Write>(grammar: Grammar, input: &str, out: &mut W) -> io::Result<()> {
    let mut machine = TuringMachine::new(grammar.table(), input);

    let print_state = |machine: &TuringMachine, out: &mut W| {
        writeln!(
            out,
            "Step: {}, State: {}, Tape: [{}], Head: {}",
            machine.step_count(),
            machine.state(),
            machine.tape(),
            machine.head()
        )
    };

    print_state(&machine, out)?;

    while machine.step_count() < machine.step_limit() {
        match machine.step() {
            Step::Continue => print_state(&machine, out)?,
            Step::Halt(Halt::Accept) => {
                print_state(&machine, out)?;
                return writeln!(out, "Machine accepted.");
            }
            Step::Halt(Halt::Reject(rejection)) => {
                return writeln!(out, "Machine rejected: {}", rejection);
            }
        }
    }

    writeln!(out, "Machine stopped after {} steps.", machine.step_limit())
}
