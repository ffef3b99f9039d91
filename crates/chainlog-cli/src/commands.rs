use std::fs;
use std::io::{self, Write};

use anyhow::{bail, Context};
use chainlog_crypto::ChainVerifier;
use chainlog_ledger::{Chain, ChainReader, ChainWriter};
use colored::Colorize;

use crate::cli::*;
use crate::config::{CliConfig, OutputFormat};
use crate::{render, shell, snapshot};

pub fn run_command(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    match cli.command {
        Command::Genesis => cmd_genesis(&mut out, config.format),
        Command::Build(args) => cmd_build(&mut out, args, config.format),
        Command::Verify(args) => cmd_verify(&mut out, args, config.format),
        Command::Shell => {
            let chain = Chain::new();
            shell::run_shell(&chain, io::stdin().lock(), &mut out, &config.prompt)
        }
    }
}

fn cmd_genesis(out: &mut impl Write, format: OutputFormat) -> anyhow::Result<()> {
    let genesis = Chain::new().genesis();
    match format {
        OutputFormat::Text => render::write_block(out, 0, &genesis)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&genesis)?)?,
    }
    Ok(())
}

/// Payloads from the command line first, then the file's lines.
fn collect_payloads(args: &BuildArgs) -> anyhow::Result<Vec<Vec<u8>>> {
    let mut payloads: Vec<Vec<u8>> = args.payloads.iter().map(|p| p.clone().into_bytes()).collect();
    if let Some(path) = &args.file {
        let bytes = fs::read(path)
            .with_context(|| format!("reading payloads from {}", path.display()))?;
        payloads.extend(split_lines(&bytes));
    }
    Ok(payloads)
}

/// Split raw bytes on `\n`, dropping a trailing `\r` per line. Lines are not
/// required to be UTF-8; a final newline does not produce an empty payload.
fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
        .collect()
}

fn cmd_build(out: &mut impl Write, args: BuildArgs, format: OutputFormat) -> anyhow::Result<()> {
    let chain = Chain::new();
    for payload in collect_payloads(&args)? {
        chain.append(&payload);
    }
    let result = chain.verify();
    let blocks = chain.blocks();
    let entries = snapshot::entries(&blocks);

    match format {
        OutputFormat::Text => {
            render::write_blocks(out, &blocks)?;
            render::write_verify_text(out, blocks.len(), &result)?;
        }
        OutputFormat::Json => writeln!(out, "{}", snapshot::to_json(&entries)?)?,
    }

    if let Some(path) = &args.out {
        snapshot::write(path, &entries)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        if format == OutputFormat::Text {
            writeln!(out, "{} Snapshot written to {}", "✓".green(), path.display().to_string().bold())?;
        }
    }

    result.context("freshly built chain failed verification")
}

fn cmd_verify(out: &mut impl Write, args: VerifyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let entries = snapshot::read(&args.path)
        .with_context(|| format!("loading snapshot {}", args.path.display()))?;
    let result = ChainVerifier::verify(&entries);

    match format {
        OutputFormat::Text => render::write_verify_text(out, entries.len(), &result)?,
        OutputFormat::Json => {
            let report = render::VerifyReport::new(entries.len(), &result);
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }

    if let Err(violation) = result {
        tracing::warn!(path = %args.path.display(), %violation, "snapshot failed verification");
        bail!("{} failed verification: {violation}", args.path.display());
    }
    Ok(())
}
