use std::time::Duration;

use sicpctl_client::Client;
use sicpctl_transport::SerialLink;

use crate::cmd::{parse_hex, SendArgs};
use crate::exit::{client_error, transport_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_response, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = parse_hex(&args.hex)?;
    let timeout = parse_duration(&args.timeout)?;

    let link = SerialLink::open_with_timeout(&args.port, args.baud, timeout)
        .map_err(|err| transport_error("open failed", err))?;
    let client = Client::from_link_with_variant(link, args.variant.into());

    let response = client
        .send(&payload)
        .map_err(|err| client_error("send failed", err))?;
    print_response(&response, &args.port, format);

    client
        .close()
        .map_err(|err| client_error("close failed", err))?;

    Ok(SUCCESS)
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}
