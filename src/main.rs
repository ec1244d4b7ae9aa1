use std::process::ExitCode;

use devai::ui::output;

fn main() -> ExitCode {
    match devai::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
