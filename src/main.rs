use std::process::ExitCode;

fn main() -> ExitCode {
    match siwe_inspector::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
