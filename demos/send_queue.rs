use std::collections::VecDeque;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use websms::{ClientConfig, ErrorCause, SendOptions, TextMessageConfig};

/// Gateway status code for "sending limit reached".
const RATE_LIMITED: i64 = 4023;
const RETRY_DELAY: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = ClientConfig::from_env()?.into_client()?;
    let recipient = std::env::var("WEBSMS_RECIPIENT")?;

    let mut queue = (1..=30)
        .map(|n| {
            TextMessageConfig {
                recipient_address_list: vec![recipient.clone()],
                message_content: Some(format!("This is a random message with number: {n}")),
                client_message_id: Some(n.to_string()),
                ..Default::default()
            }
            .build()
        })
        .collect::<Result<VecDeque<_>, _>>()?;

    // One message at a time; the next send starts only after the previous outcome is known.
    let options = SendOptions::test().max_sms_per_message(1);
    while let Some(message) = queue.front() {
        let id = message.client_message_id().unwrap_or("?");
        match client.send(message, options).await {
            Ok(response) => {
                println!("{id} transferred (transfer id {:?})", response.transfer_id);
                queue.pop_front();
            }
            Err(err)
                if err.cause() == ErrorCause::Api
                    && err.api_response().map(|r| r.status_code) == Some(RATE_LIMITED) =>
            {
                println!("{id} hit the sending limit, retrying in {RETRY_DELAY:?}");
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(err) => {
                println!("{id} not transferred, stopping: {}", err.message());
                break;
            }
        }
    }

    println!("{} message(s) left in queue", queue.len());
    Ok(())
}
