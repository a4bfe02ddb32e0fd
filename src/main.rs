use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    techlore::run().await
}
