use std::io;

use tracing_subscriber::EnvFilter;
use websms::{BinarySegment, ClientConfig, Message, SendOptions};

fn required_var(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // WEBSMS_GATEWAY_URL (optional), WEBSMS_USERNAME, WEBSMS_PASSWORD
    let client = ClientConfig::from_env()?.into_client()?;
    let recipient = required_var("WEBSMS_RECIPIENT")?;
    let really_send = std::env::var("WEBSMS_SEND").is_ok_and(|value| value == "1");
    let options = SendOptions {
        test: Some(!really_send),
        max_sms_per_message: Some(1),
    };

    let text = std::env::var("WEBSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the websms demo.".to_owned());
    let mut message = Message::text([recipient.clone()], text)?;
    message.set_client_message_id(Some("demo-text".to_owned()));

    let response = client.send(&message, options).await?;
    println!(
        "text: status_code={} transfer_id={:?}",
        response.status_code, response.transfer_id
    );

    // Two concatenated segments, each starting with a 6 byte UDH (ref 0x02, part n of 2).
    let segments = [
        BinarySegment::from_bytes(b"\x05\x00\x03\x02\x02\x01Zusammen"),
        BinarySegment::from_bytes("\x05\x00\x03\x02\x02\x02gefügt.".as_bytes()),
    ];
    let binary = Message::binary(
        [recipient],
        segments.iter().map(|segment| segment.as_str().to_owned()),
        true,
    )?;

    match client.send(&binary, options).await {
        Ok(response) => println!(
            "binary: status_code={} transfer_id={:?}",
            response.status_code, response.transfer_id
        ),
        Err(err) => eprintln!("binary: {} ({})", err.message(), err.cause()),
    }

    Ok(())
}
