#![cfg(feature = "build-binary")]
mod parse;

use crate::parse::{parse, ParsingError};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colhist::serde::{write_json, write_msgpack};
use colhist::{compute_histogram, Algorithm, HistogramBin, HistogramConfig, HistogramError};
use float_pretty_print::PrettyPrintFloat;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};

const IO_ERROR_CODE: i32 = 74;
const DATA_ERROR_CODE: i32 = 65;

/// Column histogram
#[derive(Parser, Debug)]
struct Args {
    /// Bin width for fixed-width binning; when not given, the bins are chosen
    /// adaptively with Bayesian Blocks
    #[arg(short = 'w', long, value_name = "NUMBER")]
    bin_width: Option<f64>,

    /// False-positive tolerance of the adaptive binning, ignored when a bin width is given
    #[arg(short = 'p', long, default_value_t = 0.05, value_name = "NUMBER")]
    false_positive_rate: f64,

    /// Lower end of the binned range, defaults to the smallest sample
    #[arg(long, value_name = "NUMBER", allow_hyphen_values = true)]
    min: Option<f64>,

    /// Upper end of the binned range, defaults to the largest sample
    #[arg(long, value_name = "NUMBER", allow_hyphen_values = true)]
    max: Option<f64>,

    /// Use the nth field (column) of the input, where the fields are assumed to be separated with whitespaces
    #[arg(short, long, default_value_t = 1, value_name = "NUMBER")]
    field: usize,

    /// Print JSON of the histogram rows
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Save the rows to a file at the given path (MessagePack unless the file extension is .json)
    #[arg(short, long, value_name = "PATH")]
    output_file: Option<String>,

    /// Don't print the table of bins
    #[arg(short, long, default_value_t = false)]
    no_summary: bool,

    /// Maximal width of the histogram bars when displayed
    #[arg(long, default_value_t = 10, value_name = "NUMBER")]
    width: u32,

    /// Input data file, if not given, the input is read from stdin
    file: Option<String>,
}

/// Pick the binning strategy the same way the request parameters do: a bin
/// width selects fixed-width binning, otherwise the bins are adaptive.
fn config_from(args: &Args) -> HistogramConfig {
    let algorithm = match args.bin_width {
        Some(width) => Algorithm::FixedWidth { width },
        None => Algorithm::Adaptive {
            false_positive_rate: args.false_positive_rate,
        },
    };
    HistogramConfig {
        algorithm,
        min: args.min,
        max: args.max,
    }
}

/// Read the data from a file (if provided) or stdin and collect the requested column.
fn read_data(args: &Args) -> Result<Vec<f64>, Box<dyn Error>> {
    // A file or stdin
    let input: Box<dyn Read> = match &args.file {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let mut values = Vec::new();
    let mut lines = 0;
    let mut missing = 0;
    for (index, line) in BufReader::new(input).lines().enumerate() {
        lines += 1;
        match parse(line?, args.field - 1) {
            Ok(value) => values.push(value),
            // on parsing failure ignore this line and print warning to stderr
            Err(err) => {
                if err == ParsingError::Missing {
                    missing += 1;
                }
                eprintln!("line {}: {}", index + 1, err);
            }
        }
    }
    // a field that never shows up is a missing column, not line noise
    if lines > 0 && missing == lines {
        return Err(Box::new(HistogramError::ColumnNotFound(format!(
            "field {}",
            args.field
        ))));
    }
    Ok(values)
}

/// Write the rows to a file:
/// * when the file extension is .json (case-insensitive) as a JSON,
/// * otherwise as a MessagePack.
fn write(bins: &[HistogramBin], path: &str) -> Result<(), Box<dyn Error>> {
    let file = &mut File::create(path).map_err(Box::new)?;
    if is_json(path) {
        write_json(bins, file)
    } else {
        write_msgpack(bins, file)
    }
}

fn is_json(path: &str) -> bool {
    path.to_lowercase().ends_with(".json")
}

/// Print JSON for the histogram rows.
fn print_json(bins: &[HistogramBin]) -> Result<(), Box<dyn Error>> {
    let stdout = &mut io::stdout().lock();
    write_json(bins, stdout)
}

/// Format the bin count, observed range, and histogram bar as a string.
fn bin_to_string(bin: &HistogramBin, max_count: u64, width: u32) -> String {
    debug_assert!(bin.count <= max_count);

    // the maximal width of the histogram bar is given by a command line option
    // it is scaled relatively to the maximum count of the bins
    let relative_count = if max_count == 0 {
        0.0
    } else {
        bin.count as f32 / max_count as f32
    };
    let bar_width = (relative_count * width as f32).round() as usize;
    debug_assert!(bar_width <= width as usize);
    let bar = &"■".repeat(bar_width);

    format!(
        "{:6} {:8.3} {:8.3}\t{}",
        bin.count,
        PrettyPrintFloat(bin.min),
        PrettyPrintFloat(bin.max),
        bar
    )
}

/// Print the histogram as text plot.
fn print_histogram(bins: &[HistogramBin], width: u32) {
    let max_count = bins.iter().fold(0, |acc, bin| acc.max(bin.count));

    println!("count\tmin\tmax");
    for bin in bins {
        let line = bin_to_string(bin, max_count, width);
        println!("{}", line);
    }
}

/// Parse and validate the CLI arguments
fn parse_args() -> Args {
    let args = Args::parse();
    if args.field < 1 {
        let mut cmd = Args::command();
        cmd.error(ErrorKind::InvalidValue, "field index needs to start at 1")
            .exit();
    }
    args
}

fn main() {
    let args = parse_args();

    let values = read_data(&args)
        .map_err(|err| {
            eprintln!("failed to read the input: {}", err);
            std::process::exit(IO_ERROR_CODE);
        })
        .unwrap();

    let bins = compute_histogram(&values, &config_from(&args))
        .map_err(|err| {
            eprintln!("failed to compute the histogram: {}", err);
            std::process::exit(DATA_ERROR_CODE);
        })
        .unwrap();

    if args.json {
        if let Err(err) = print_json(&bins) {
            eprintln!("failed to print JSON: {}", err);
            std::process::exit(IO_ERROR_CODE);
        }
    }
    if !args.no_summary {
        print_histogram(&bins, args.width);
    }

    if let Some(path) = args.output_file {
        if let Err(err) = write(&bins, &path) {
            eprintln!("failed to write the output: {}", err);
            std::process::exit(IO_ERROR_CODE);
        }
    }
}
