use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    ExitCode::from(bhk::cli::run(std::env::args(), &mut stdout, &mut stderr))
}
