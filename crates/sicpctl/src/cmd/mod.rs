use clap::{Args, Subcommand, ValueEnum};

use sicpctl_frame::ProtocolVariant;

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod encode;
pub mod ports;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send one command frame and print the response.
    Send(SendArgs),
    /// Encode a command frame without touching a port.
    Encode(EncodeArgs),
    /// List local serial ports.
    Ports(PortsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Ports(args) => ports::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Serial port to open (e.g. /dev/ttyUSB0, COM3).
    pub port: String,
    /// Command payload as hex bytes (e.g. "01 30").
    #[arg(long, value_name = "BYTES")]
    pub hex: String,
    /// Baud rate.
    #[arg(long, default_value_t = 9600)]
    pub baud: u32,
    /// Response header layout.
    #[arg(long, value_enum, default_value_t = VariantArg::SixByte)]
    pub variant: VariantArg,
    /// Read timeout (e.g. 5s, 500ms).
    #[arg(long, default_value = "1s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Command payload as hex bytes (e.g. "01 30").
    #[arg(long, value_name = "BYTES")]
    pub hex: String,
}

#[derive(Args, Debug, Default)]
pub struct PortsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum VariantArg {
    /// Legacy 5-byte response header.
    FiveByte,
    /// Current 6-byte response header.
    SixByte,
}

impl From<VariantArg> for ProtocolVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::FiveByte => ProtocolVariant::FiveByte,
            VariantArg::SixByte => ProtocolVariant::SixByte,
        }
    }
}

/// Parse a hex byte string; spaces, commas, and a 0x prefix are accepted.
pub(crate) fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let cleaned: String = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|token| token.strip_prefix("0x").unwrap_or(token))
        .collect();

    if cleaned.len() % 2 != 0 {
        return Err(CliError::new(
            USAGE,
            format!("odd number of hex digits in payload: {input:?}"),
        ));
    }

    (0..cleaned.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&cleaned[i..i + 2], 16).map_err(|_| {
                CliError::new(USAGE, format!("invalid hex byte: {:?}", &cleaned[i..i + 2]))
            })
        })
        .collect()
}
