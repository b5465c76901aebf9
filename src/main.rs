use std::process::ExitCode;

fn main() -> ExitCode {
    blazorgrab::logging::init();

    match blazorgrab::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}
