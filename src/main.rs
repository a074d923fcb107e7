use std::{
	env,
	io::{self, Write},
	process::ExitCode,
};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use dicebatch::{
	charset::DivisionMarker,
	dice::roller::FastRand as FastRandRoller,
	engine::{format_values, Error},
	expr::Describe,
	Engine,
};

/// Maximum number of individual rolls listed per dice term
const LIST_LIMIT: usize = 20;

/// Name the request is shown under in error reports
const SOURCE_NAME: &str = "request";

fn main() -> ExitCode {
	let mut division = DivisionMarker::Pipe;
	let mut seed = None;
	let mut words = Vec::new();

	let mut args = env::args().skip(1);
	while let Some(arg) = args.next() {
		match arg.as_str() {
			"--slash" => division = DivisionMarker::Slash,
			"--seed" => match args.next().map(|val| val.parse::<u64>()) {
				Some(Ok(val)) => seed = Some(val),
				_ => {
					eprintln!("--seed needs a non-negative integer");
					return ExitCode::FAILURE;
				}
			},
			_ => words.push(arg),
		}
	}

	let input = if words.is_empty() {
		match read_line() {
			Ok(line) => line,
			Err(err) => {
				eprintln!("Unable to read input: {err}");
				return ExitCode::FAILURE;
			}
		}
	} else {
		// Obtain the request by combining all remaining args passed to the executable, so that it can be left unquoted
		words.concat()
	};

	let engine = Engine::builder().division_marker(division).build();
	let mut roller = seed.map_or_else(FastRandRoller::default, FastRandRoller::with_seed);

	match engine.roll(&input, &mut roller) {
		Ok(segments) => {
			for segment in &segments {
				println!("{}", segment.describe(Some(LIST_LIMIT)));
			}
			let values = segments.into_iter().map(|segment| segment.value).collect::<Vec<_>>();
			println!("{}", format_values(&values));
			ExitCode::SUCCESS
		}
		Err(err) => {
			report(&input, &err);
			ExitCode::FAILURE
		}
	}
}

/// Reads the first line of stdin, displaying a prompt for it if there isn't already input available.
fn read_line() -> io::Result<String> {
	let mut lines = io::stdin().lines();

	if lines.size_hint().1.is_none() {
		print!("Enter dice roll: ");
		io::stdout().flush()?;
	}

	lines.next().unwrap_or_else(|| Ok(String::new()))
}

/// Prints a report for an evaluation error, pointing at the offending part of the request.
fn report(input: &str, err: &Error) {
	let span = err.span();
	let mut lines = err.to_string();
	let label = lines.split_off(lines.find('\n').unwrap_or(lines.len()));

	// Error spans are byte ranges
	let result = Report::build(ReportKind::Error, (SOURCE_NAME, span.clone()))
		.with_config(Config::default().with_index_type(IndexType::Byte))
		.with_message(lines)
		.with_label(
			Label::new((SOURCE_NAME, span))
				.with_message(label.trim())
				.with_color(Color::Red),
		)
		.finish()
		.eprint((SOURCE_NAME, Source::from(input)));

	if result.is_err() {
		eprintln!("{err}");
	}
}
