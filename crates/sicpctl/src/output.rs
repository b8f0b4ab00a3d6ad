use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use sicpctl_frame::Response;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ResponseOutput<'a> {
    port: &'a str,
    monitor_id: u8,
    category: u8,
    page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    function: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    control: Option<u8>,
    data: String,
    checksum: String,
    frame: String,
}

pub fn print_response(response: &Response, port: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = ResponseOutput {
                port,
                monitor_id: response.monitor_id(),
                category: response.category(),
                page: response.page(),
                function: response.function(),
                length: response.length(),
                control: response.control(),
                data: to_hex(response.data()),
                checksum: format!("{:02X}", response.checksum()),
                frame: to_hex(response.frame()),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "MONITOR", "DATA", "CHECKSUM", "FRAME"])
                .add_row(vec![
                    port.to_string(),
                    format!("{:02X}", response.monitor_id()),
                    to_hex(response.data()),
                    format!("{:02X}", response.checksum()),
                    to_hex(response.frame()),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "port={} monitor={:02X} data=[{}] checksum={:02X}",
                port,
                response.monitor_id(),
                to_hex(response.data()),
                response.checksum()
            );
        }
        OutputFormat::Raw => {
            print_raw(response.data());
        }
    }
}

#[derive(Serialize)]
struct EncodedOutput {
    size: usize,
    frame: String,
}

pub fn print_encoded(frame: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = EncodedOutput {
                size: frame.len(),
                frame: to_hex(frame),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SIZE", "FRAME"])
                .add_row(vec![frame.len().to_string(), to_hex(frame)]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{}", to_hex(frame));
        }
        OutputFormat::Raw => {
            print_raw(frame);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Space-separated uppercase hex, the notation device manuals use.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
