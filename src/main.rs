//! diachron CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;

use diachron::cli::args::DiachronArgs;
use diachron::cli::commands::execute_command;

fn main() {
    let args = DiachronArgs::parse();

    // Log lines go to stderr so stdout stays a clean JSON stream
    Builder::new()
        .filter_level(args.log_level())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
