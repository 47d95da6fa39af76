use portfolio_advisor::{config, create_default_dispatcher, DialogRequest};
use tokio::io::AsyncReadExt;
use tracing::info;

/// Usage: portfolio-advisor [EVENT_FILE]
///
/// Reads one code-hook event (from the file, or stdin when omitted) and
/// prints the dialog response.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    config::init_tracing();

    let raw = read_event(std::env::args().nth(1)).await?;
    let request = DialogRequest::from_json(&raw)?;

    let dispatcher = create_default_dispatcher();

    match dispatcher.dispatch(request) {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("Dialog handling failed: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}

async fn read_event(path: Option<String>) -> portfolio_advisor::Result<String> {
    match path {
        Some(path) => {
            info!(path = %path, "Reading event file");
            Ok(tokio::fs::read_to_string(&path).await?)
        }
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            Ok(buf)
        }
    }
}
