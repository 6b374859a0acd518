use std::io;

fn main() {
    chromatic_cli::logging::init_logging();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let code = chromatic_cli::run(std::env::args(), &mut stdout, &mut stderr);
    std::process::exit(code);
}
