use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serialport::SerialPortType;

use crate::cmd::PortsArgs;
use crate::exit::{io_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct PortOutput {
    name: String,
    kind: &'static str,
    description: String,
}

pub fn run(_args: PortsArgs, format: OutputFormat) -> CliResult<i32> {
    let ports = serialport::available_ports().map_err(|err| {
        io_error(
            "failed to enumerate serial ports",
            std::io::Error::other(err.to_string()),
        )
    })?;

    let rows: Vec<PortOutput> = ports
        .into_iter()
        .map(|port| {
            let (kind, description) = describe(&port.port_type);
            PortOutput {
                name: port.port_name,
                kind,
                description,
            }
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "KIND", "DESCRIPTION"]);
            for row in &rows {
                table.add_row(vec![
                    row.name.clone(),
                    row.kind.to_string(),
                    row.description.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                println!("{}", row.name);
            }
        }
    }

    Ok(SUCCESS)
}

fn describe(port_type: &SerialPortType) -> (&'static str, String) {
    match port_type {
        SerialPortType::UsbPort(info) => {
            let product = info.product.as_deref().unwrap_or("usb serial device");
            (
                "usb",
                format!("{product} ({:04x}:{:04x})", info.vid, info.pid),
            )
        }
        SerialPortType::PciPort => ("pci", "PCI serial port".to_string()),
        SerialPortType::BluetoothPort => ("bluetooth", "Bluetooth serial port".to_string()),
        SerialPortType::Unknown => ("unknown", String::new()),
    }
}
