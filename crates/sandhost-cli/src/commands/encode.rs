//! Encode commands

use super::{parse_address, parse_hex, parse_word};
use crate::{output::Output, CliError};
use clap::Args;
use sandhost_codec::{encode_call, encode_log, CallFlags, CallKind, CallMessage};
use sandhost_evm::HostConfig;
use sandhost_primitives::{Address, H256, U256};

/// Arguments for `encode-call`
#[derive(Debug, Args)]
pub struct EncodeCallArgs {
    /// Call kind: call, delegatecall, callcode, create, create2
    #[arg(long, default_value = "call", value_parser = parse_kind)]
    pub kind: CallKind,
    /// Caller address
    #[arg(long)]
    pub sender: Option<String>,
    /// Callee address
    #[arg(long)]
    pub destination: Option<String>,
    /// Gas limit
    #[arg(long, default_value_t = 21000)]
    pub gas: u64,
    /// Call data as hex
    #[arg(long, default_value = "")]
    pub input: String,
    /// Value in wei (decimal)
    #[arg(long, default_value = "0")]
    pub value: String,
    /// CREATE2 salt as 32-byte hex
    #[arg(long)]
    pub salt: Option<String>,
    /// Call depth
    #[arg(long, default_value_t = 0)]
    pub depth: u32,
    /// Set the static flag
    #[arg(long = "static")]
    pub is_static: bool,
}

fn parse_kind(s: &str) -> Result<CallKind, String> {
    match s.to_ascii_lowercase().as_str() {
        "call" => Ok(CallKind::Call),
        "delegatecall" => Ok(CallKind::DelegateCall),
        "callcode" => Ok(CallKind::CallCode),
        "create" => Ok(CallKind::Create),
        "create2" => Ok(CallKind::Create2),
        other => Err(format!("unknown call kind '{}'", other)),
    }
}

fn optional_address(s: Option<&str>) -> Result<Address, CliError> {
    s.map(parse_address).transpose().map(Option::unwrap_or_default)
}

/// Build and print a call message
pub fn call(args: &EncodeCallArgs, config: &HostConfig, json: bool) -> Result<(), CliError> {
    let sender = optional_address(args.sender.as_deref())?;
    let destination = optional_address(args.destination.as_deref())?;
    let value = U256::from_dec_str(&args.value)
        .map_err(|e| CliError::InvalidInput(format!("value: {:?}", e)))?;
    let salt = match &args.salt {
        Some(s) => parse_word(s)?,
        None => H256::ZERO,
    };
    let flags = if args.is_static {
        CallFlags::STATIC
    } else {
        CallFlags::NONE
    };

    let msg = CallMessage::new(args.kind, sender, destination, args.gas)
        .with_input(parse_hex(&args.input)?)
        .with_value(value)
        .with_salt(salt)
        .with_flags(flags)
        .with_depth(args.depth);
    let encoded = encode_call(&msg, config.call_buffer_capacity)?;

    Output::new(json)
        .field_u64("length", encoded.len() as u64)
        .field_hex("encoded", &encoded)
        .print();
    Ok(())
}

/// Build and print a log record
pub fn log(data: &str, topics: &[String], config: &HostConfig, json: bool) -> Result<(), CliError> {
    let data = parse_hex(data)?;
    let topics = topics
        .iter()
        .map(|t| parse_word(t))
        .collect::<Result<Vec<_>, _>>()?;
    let encoded = encode_log(&data, &topics, config.log_buffer_capacity)?;

    Output::new(json)
        .field_u64("length", encoded.len() as u64)
        .field_hex("encoded", &encoded)
        .print();
    Ok(())
}
