//! Interactive line-oriented session.

use crate::commands::{Command, ShellLine, execute};
use anyhow::Context;
use clap::Parser;
use deskmate_core::Assistant;
use log::{debug, warn};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const PROMPT: &str = "deskmate> ";
const BANNER: &str = "Deskmate shell. Type `help` for commands, `exit` to quit.";

/// Read commands from stdin until EOF or `exit`; reminders keep firing meanwhile.
pub async fn run(assistant: &mut Assistant) -> anyhow::Result<()> {
    println!("{BANNER}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }
        let command = match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        debug!("shell command: {command:?}");
        if matches!(command, Command::Ask { .. }) {
            println!("Thinking...");
        }
        match execute(assistant, command).await {
            Ok(output) => println!("{output}"),
            Err(err) => {
                warn!("shell command failed: {err:#}");
                println!("Error: {err:#}");
            }
        }
    }
    Ok(())
}

fn prompt() -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{PROMPT}").context("failed to write prompt")?;
    stdout.flush().context("failed to flush prompt")
}
