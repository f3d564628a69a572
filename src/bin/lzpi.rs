use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::process;

use getopts::Options;
use tracing::{error, info};

/// Print a usage summary to stdout that describes the command syntax.
fn print_usage(program: &str, opts: &Options) {
    let brief = format!(
        "Usage: {} [-d] [-i FILE] [-o FILE]\n\nFilters stdin to stdout by default.",
        program
    );
    print!("{}", opts.usage(&brief));
}

fn open_input(path: Option<&str>) -> io::Result<Box<dyn Read>> {
    match path {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(path: Option<&str>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn run(decompress: bool, input: Option<&str>, output: Option<&str>) -> Result<(), lzpi::error::Error> {
    let source = lzpi::count::CountingReader::new(open_input(input)?);
    let in_count = source.count();
    let sink = lzpi::count::CountingWriter::new(open_output(output)?);

    let mut out = if decompress {
        lzpi::decompress(source, sink)?
    } else {
        lzpi::compress(source, sink)?
    };
    out.flush()?;

    let bytes_in = in_count.get();
    let bytes_out = out.count();
    let ratio = if bytes_in == 0 { 0.0 } else { bytes_out as f64 / bytes_in as f64 };
    info!(bytes_in, bytes_out, ratio, "finished");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(
            "warn".parse().expect("built-in directive always parses"),
        ))
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("i", "input", "read from FILE instead of stdin", "FILE");
    opts.optopt("o", "output", "write to FILE instead of stdout", "FILE");
    opts.optflag("d", "decompress", "decompress instead of compress");
    opts.optflag("h", "help", "print this help and exit");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(err) => {
            eprintln!("{}", err);
            print_usage(&program, &opts);
            process::exit(2);
        }
    };

    if matches.opt_present("h") {
        print_usage(&program, &opts);
        return;
    }

    let decompress = matches.opt_present("d");
    let input = matches.opt_str("i");
    let output = matches.opt_str("o");

    if let Err(err) = run(decompress, input.as_deref(), output.as_deref()) {
        error!(%err, "failed");
        eprintln!("{}: {}", program, err);
        process::exit(1);
    }
}
