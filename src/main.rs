#[tokio::main]
async fn main() {
    if let Err(e) = psychage_intake_lib::run().await {
        eprintln!("psychage-intake: {e}");
        std::process::exit(1);
    }
}
