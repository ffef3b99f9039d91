use std::io::{BufRead, Write};
use std::path::Path;

use chainlog_ledger::{Block, Chain, ChainReader, ChainWriter};
use colored::Colorize;

use crate::{render, snapshot};

const HELP: &str = "\
commands:
  append <text>   append a block (no text appends an empty payload)
  show            list every block
  tip             show the latest block
  verify          recompute every commitment
  export <path>   write a JSON snapshot
  help            this message
  quit            leave the shell";

/// Read commands from `input` until `quit` or end of input.
pub fn run_shell<R: BufRead, W: Write>(
    chain: &Chain,
    mut input: R,
    out: &mut W,
    prompt: &str,
) -> anyhow::Result<()> {
    let mut line = String::new();
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let trimmed = line.trim_end_matches(['\r', '\n']);
        let (command, rest) = trimmed
            .trim_start()
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed.trim(), ""));

        match command {
            "" => {}
            "append" => {
                let block = chain.append(rest.as_bytes());
                write_located(out, chain, &block)?;
            }
            "show" => render::write_blocks(out, &chain.blocks())?,
            "tip" => write_located(out, chain, &chain.tip())?,
            "verify" => render::write_verify_text(out, chain.block_count(), &chain.verify())?,
            "export" if !rest.trim().is_empty() => {
                let path = Path::new(rest.trim());
                match snapshot::write(path, &snapshot::entries(&chain.blocks())) {
                    Ok(()) => writeln!(out, "{} wrote {}", "✓".green(), path.display())?,
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %err, "export failed");
                        writeln!(out, "{} export to {} failed: {err}", "✗".red(), path.display())?;
                    }
                }
            }
            "export" => writeln!(out, "usage: export <path>")?,
            "help" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => break,
            other => writeln!(out, "unknown command: {other} (try `help`)")?,
        }
    }
    tracing::debug!(blocks = chain.block_count(), "shell closed");
    Ok(())
}

/// Render `block` with the index its commitment occupies in `chain`.
fn write_located<W: Write>(out: &mut W, chain: &Chain, block: &Block) -> std::io::Result<()> {
    let index = chain.position(&block.commitment()).unwrap_or_default();
    render::write_block(out, index, block)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run(script: &str) -> (Chain, String) {
        colored::control::set_override(false);
        let chain = Chain::new();
        let mut out: Vec<u8> = Vec::new();
        run_shell(&chain, Cursor::new(script.to_string()), &mut out, "> ").unwrap();
        (chain, String::from_utf8(out).unwrap())
    }

    #[test]
    fn append_then_verify() {
        let (chain, output) = run("append tx1\nappend tx2\nverify\nquit\n");
        assert_eq!(chain.block_count(), 3);
        assert_eq!(chain.get(1).unwrap().payload(), b"tx1");
        assert!(output.contains("Chain integrity verified (3 blocks)"));
    }

    #[test]
    fn append_keeps_inner_spaces() {
        let (chain, _) = run("append hello  world\n");
        assert_eq!(chain.tip().payload(), b"hello  world");
    }

    #[test]
    fn bare_append_adds_empty_payload() {
        let (chain, _) = run("append\n");
        assert_eq!(chain.block_count(), 2);
        assert!(chain.tip().payload().is_empty());
    }

    #[test]
    fn stops_at_end_of_input() {
        let (chain, output) = run("append a");
        assert_eq!(chain.block_count(), 2);
        assert!(output.ends_with("> \n"));
    }

    #[test]
    fn quit_ignores_remaining_lines() {
        let (chain, _) = run("quit\nappend late\n");
        assert_eq!(chain.block_count(), 1);
    }

    #[test]
    fn unknown_command_is_reported() {
        let (_, output) = run("delete 1\n");
        assert!(output.contains("unknown command: delete"));
    }

    #[test]
    fn show_lists_blocks() {
        let (_, output) = run("append tx1\nshow\n");
        assert!(output.contains("genesis"));
        assert!(output.contains("\"tx1\""));
    }

    #[test]
    fn export_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let (_, output) = run(&format!("append tx1\nexport {}\n", path.display()));

        assert!(output.contains("wrote"));
        let entries = snapshot::read(&path).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn failed_export_keeps_session_open() {
        let (chain, output) =
            run("append a\nexport /nonexistent/chainlog/dir/x.json\nappend b\nquit\n");
        assert!(output.contains("export to /nonexistent/chainlog/dir/x.json failed"));
        assert_eq!(chain.block_count(), 3);
        assert_eq!(chain.tip().payload(), b"b");
    }

    #[test]
    fn tab_separates_command_from_payload() {
        let (chain, output) = run("append\tx\n");
        assert!(!output.contains("unknown command"));
        assert_eq!(chain.tip().payload(), b"x");
    }

    #[test]
    fn printed_index_matches_block() {
        let chain = Chain::new();
        chain.append(b"a");
        let shared = chain.append(b"b");
        chain.append(b"c");

        colored::control::set_override(false);
        let mut out: Vec<u8> = Vec::new();
        write_located(&mut out, &chain, &shared).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("#2  "));
    }

    #[test]
    fn export_without_path_prints_usage() {
        let (_, output) = run("export\n");
        assert!(output.contains("usage: export <path>"));
    }
}
