//! Decode commands

use super::parse_hex;
use crate::{output::Output, CliError};
use sandhost_codec::{decode_call, decode_log, decode_program, decode_result, GasAccounting};
use sandhost_evm::HostConfig;
use sandhost_primitives::Gas;

/// Print the fields of an encoded call message
pub fn call(hex: &str, json: bool) -> Result<(), CliError> {
    let bytes = parse_hex(hex)?;
    let msg = decode_call(&bytes)?;
    tracing::debug!(len = bytes.len(), kind = %msg.kind, "decoded call message");

    Output::new(json)
        .field("kind", msg.kind.name())
        .field_u64("flags", u64::from(msg.flags.bits()))
        .field_bool("static", msg.is_static())
        .field_u64("depth", u64::from(msg.depth))
        .field_u64("gas", msg.gas)
        .field("destination", &msg.destination.to_hex())
        .field("sender", &msg.sender.to_hex())
        .field_hex("input", &msg.input)
        .field("value", &msg.value.to_u256().to_string())
        .field("create2_salt", &msg.create2_salt.to_hex())
        .print();
    Ok(())
}

/// Print the fields of an encoded call result
pub fn result(
    hex: &str,
    gas: Gas,
    gas_trailer: bool,
    config: &HostConfig,
    json: bool,
) -> Result<(), CliError> {
    let bytes = parse_hex(hex)?;
    let accounting = if gas_trailer {
        GasAccounting::Trailer
    } else {
        config.gas_accounting
    };
    let result = decode_result(&bytes, gas, accounting)?;

    Output::new(json)
        .field("status", if result.is_success() { "success" } else { "failure" })
        .field_u64("gas_left", result.gas_left)
        .field_hex("output", &result.output)
        .field("created_address", &result.created_address.to_hex())
        .print();
    Ok(())
}

/// Print the fields of an encoded log record
pub fn log(hex: &str, json: bool) -> Result<(), CliError> {
    let bytes = parse_hex(hex)?;
    let event = decode_log(&bytes)?;
    let topics: Vec<String> = event.topics.iter().map(|t| t.to_hex()).collect();

    Output::new(json)
        .field_hex("data", &event.data)
        .field_list("topics", &topics)
        .print();
    Ok(())
}

/// Print the fields of an encoded program record
pub fn program(hex: &str, json: bool) -> Result<(), CliError> {
    let bytes = parse_hex(hex)?;
    let program = decode_program(&bytes)?;
    tracing::debug!(len = bytes.len(), kind = %program.kind, "decoded program");

    Output::new(json)
        .field("kind", program.kind.name())
        .field_u64("flags", u64::from(program.flags.bits()))
        .field_u64("depth", u64::from(program.depth))
        .field("sender", &program.sender.to_hex())
        .field("destination", &program.destination.to_hex())
        .field_hex("code", &program.code)
        .field_hex("input", &program.input)
        .print();
    Ok(())
}
