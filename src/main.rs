use crate::flight::FlightEvent;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tabled::settings::Style;
use tracing::{debug, error};

mod calendar;
mod flight;
mod itinerary;
mod logging;
mod route;
mod time;

#[derive(Parser)]
#[command(about = "Turn a flight itinerary text into a calendar event")]
struct Args {
    /// Path to the itinerary text file
    #[arg(short, long, value_name = "FILE", default_value = "text.txt")]
    input: PathBuf,

    /// Directory the .ics file is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Print the extracted flight as JSON instead of writing a calendar file
    #[arg(long, conflicts_with = "interactive")]
    json: bool,

    /// Start an interactive shell
    #[arg(long)]
    interactive: bool,
}

const COMMANDS: [&str; 9] = ["load", "paste", "ls", "show", "json", "export", "help", "exit", "quit"];

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

type Shell = Editor<CompleteHelper, DefaultHistory>;

fn report(context: &str, err: &dyn Error) {
    error!(error = %err, "{}", context);
    eprintln!("{} {}", context.red().bold(), err);
}

fn describe(flight: &FlightEvent) -> String {
    format!(
        "{} on {}: {} -> {}",
        flight.name().bold(),
        flight.date(),
        flight.departure_city(),
        flight.arrival_city()
    )
}

fn load(path: &Path) -> Result<FlightEvent, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let flight = itinerary::extract(&text)?;
    debug!(
        file = %path.display(),
        flight = flight.name(),
        route = %flight.route(),
        departure = %flight.departure_utc(),
        arrival = %flight.arrival_utc(),
        "flight extracted"
    );
    Ok(flight)
}

fn convert(args: &Args) -> Result<(), Box<dyn Error>> {
    let flight = load(&args.input)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&flight)?);
    } else {
        let path = calendar::write(&flight, &args.out_dir)?;
        println!("{} {}", "Calendar event created:".green(), path.display());
    }
    Ok(())
}

/// 1-based index into the session; an empty argument means the latest flight.
fn pick<'a>(flights: &'a [FlightEvent], arg: &str) -> Option<&'a FlightEvent> {
    if arg.is_empty() {
        return flights.last();
    }
    arg.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| flights.get(i))
}

fn read_pasted(rl: &mut Shell) -> rustyline::Result<String> {
    println!("Paste the itinerary, finish with a line containing only '.'");
    let mut lines = Vec::new();
    loop {
        match rl.readline(".. ") {
            Ok(line) if line.trim() == "." => break,
            Ok(line) => lines.push(line),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(lines.join("\n"))
}

fn print_help() {
    println!("\nAvailable Commands:");
    println!("  load [file]         - Extract a flight from <file> (default: --input) into the session");
    println!("  paste               - Extract a flight from text typed or pasted at the prompt");
    println!("  ls                  - List the flights of this session");
    println!("  show [n]            - Print flight <n> (1-based, default: latest) as iCalendar");
    println!("  json [n]            - Print flight <n> as JSON");
    println!("  export [n] [dir]    - Write flight <n> as an .ics file into <dir> (default: --out-dir)");
    println!("  help / ?            - Show this help menu");
    println!("  exit / quit         - Leave the shell\n");
}

fn shell(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
    };

    let mut rl: Shell = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    let mut flights: Vec<FlightEvent> = Vec::new();
    println!("Itinerary shell. Type 'help' for commands.");

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                let (cmd, rest) = trimmed
                    .split_once(char::is_whitespace)
                    .map(|(cmd, rest)| (cmd, rest.trim()))
                    .unwrap_or((trimmed, ""));
                match cmd {
                    "load" => {
                        let path = if rest.is_empty() {
                            args.input.clone()
                        } else {
                            PathBuf::from(rest)
                        };
                        match load(&path) {
                            Ok(flight) => {
                                println!("{} {}", "Loaded".green(), describe(&flight));
                                flights.push(flight);
                            }
                            Err(err) => report("Could not load flight:", &*err),
                        }
                    }
                    "paste" => {
                        let text = read_pasted(&mut rl)?;
                        match itinerary::extract(&text) {
                            Ok(flight) => {
                                println!("{} {}", "Parsed".green(), describe(&flight));
                                flights.push(flight);
                            }
                            Err(err) => report("Could not parse flight:", &err),
                        }
                    }
                    "ls" => {
                        if flights.is_empty() {
                            println!("No flights loaded.")
                        } else {
                            let mut table = tabled::Table::new(&flights);
                            table.with(Style::rounded());
                            table.with(tabled::settings::Alignment::left());
                            println!("{}", table);
                        }
                    }
                    "show" => match pick(&flights, rest) {
                        Some(flight) => print!("{}", calendar::to_calendar(flight)),
                        None => println!("No such flight: {}", rest),
                    },
                    "json" => match pick(&flights, rest) {
                        Some(flight) => println!("{}", serde_json::to_string_pretty(flight)?),
                        None => println!("No such flight: {}", rest),
                    },
                    "export" => {
                        let mut parts = rest.split_whitespace();
                        let index = parts.next().unwrap_or("");
                        let dir = parts.next().map(PathBuf::from).unwrap_or_else(|| args.out_dir.clone());
                        match pick(&flights, index) {
                            Some(flight) => match calendar::write(flight, &dir) {
                                Ok(path) => println!("{} {}", "Calendar event created:".green(), path.display()),
                                Err(err) => report("Could not export flight:", &err),
                            },
                            None => println!("Usage: export [n] [dir]"),
                        }
                    }
                    "help" | "?" => print_help(),
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", cmd),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init();

    let result = if args.interactive { shell(&args) } else { convert(&args) };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report("Error creating calendar event:", &*err);
            ExitCode::FAILURE
        }
    }
}
