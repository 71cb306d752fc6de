use std::process::ExitCode;

fn main() -> ExitCode {
    prescription_verifier::init_tracing();

    match prescription_verifier::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            ExitCode::FAILURE
        }
    }
}
