use std::io::Write;

use clap::Parser;

use testbackend::cli::{self, Cli};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    let code = match cli::execute(cli, &mut stdout) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            1
        }
    };
    let _ = stdout.flush();
    std::process::exit(code);
}
