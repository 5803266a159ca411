extern crate chaintable;
extern crate clap;
#[macro_use]
extern crate log;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;
use clap::Parser;
use chaintable::harness::Scenario;
use chaintable::logger::initialize_logger;

/// Runs the table test scenarios against a file of records.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Scenario number: 1 put/get, 2 remove, 3 sorted output,
  /// 4 get speed, 5 remove speed, 6 output speed
  test: u32,

  /// File of `<key> <data>` records
  #[arg(short, long, default_value = "fips.txt")]
  input: PathBuf,
}

fn main() {
  initialize_logger();
  let args = Args::parse();

  let file = match File::open(&args.input) {
    Ok(file) => file,
    Err(e) => {
      println!("No {} in current directory. Quitting", args.input.display());
      debug!("open failed: {}", e);
      process::exit(2);
    }
  };

  let scenario = match Scenario::from_number(args.test) {
    Some(scenario) => scenario,
    None => {
      println!("test# can be 1 to 6 only");
      process::exit(3);
    }
  };

  let mut input = BufReader::new(file);
  let stdout = io::stdout();
  match scenario.run(&mut input, &mut stdout.lock()) {
    Ok(true) => {}
    Ok(false) => process::exit(4),
    Err(e) => {
      error!("{}", e);
      process::exit(4);
    }
  }
}
