use std::{env, process};

use cashcast::{
    cli::{self, output},
    errors::CliError,
    init,
};

fn main() {
    init();

    let result = cli::parse_args(env::args().skip(1)).and_then(cli::run);
    if let Err(err) = result {
        output::error(&err);
        match &err {
            CliError::Core(core) => {
                if let Some(hint) = core.hint() {
                    output::hint(hint);
                }
            }
            CliError::Usage(_) => eprintln!("\n{}", cli::USAGE),
        }
        process::exit(1);
    }
}
