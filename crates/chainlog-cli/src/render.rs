use std::io::Write;

use chainlog_crypto::StructuralViolation;
use chainlog_ledger::Block;
use colored::Colorize;
use serde::Serialize;

/// Human-readable payload: quoted UTF-8 when possible, otherwise hex.
pub fn describe_payload(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => format!("{text:?}"),
        Err(_) => format!("0x{}", hex::encode(payload)),
    }
}

pub fn write_block(out: &mut impl Write, index: usize, block: &Block) -> std::io::Result<()> {
    let label = if block.is_genesis() {
        "genesis".green().to_string()
    } else {
        format!("#{index}").yellow().to_string()
    };
    let previous = block
        .previous_commitment()
        .map(|c| c.short_hex())
        .unwrap_or_else(|| "-".into());

    writeln!(
        out,
        "{label}  {}  prev {}  {}",
        block.commitment().short_hex().bold(),
        previous.dimmed(),
        describe_payload(block.payload())
    )
}

pub fn write_blocks(out: &mut impl Write, blocks: &[Block]) -> std::io::Result<()> {
    for (index, block) in blocks.iter().enumerate() {
        write_block(out, index, block)?;
    }
    Ok(())
}

/// Machine-readable verification result.
#[derive(Debug, Serialize)]
pub struct VerifyReport {
    pub valid: bool,
    pub blocks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl VerifyReport {
    pub fn new(blocks: usize, result: &Result<(), StructuralViolation>) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                blocks,
                index: None,
                kind: None,
            },
            Err(violation) => Self {
                valid: false,
                blocks,
                index: Some(violation.index),
                kind: Some(violation.kind.to_string()),
            },
        }
    }
}

pub fn write_verify_text(
    out: &mut impl Write,
    blocks: usize,
    result: &Result<(), StructuralViolation>,
) -> std::io::Result<()> {
    match result {
        Ok(()) => writeln!(
            out,
            "{} Chain integrity verified ({blocks} blocks)",
            "✓".green().bold()
        ),
        Err(violation) => writeln!(
            out,
            "{} Chain integrity violated: {}",
            "✗".red().bold(),
            violation.to_string().red()
        ),
    }
}
