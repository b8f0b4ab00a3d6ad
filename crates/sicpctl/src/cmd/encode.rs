use sicpctl_frame::encode_command;

use crate::cmd::{parse_hex, EncodeArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = parse_hex(&args.hex)?;
    let frame =
        encode_command(&payload).map_err(|err| frame_error("encode failed", err))?;
    print_encoded(&frame, format);
    Ok(SUCCESS)
}
