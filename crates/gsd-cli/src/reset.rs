//! # `gsd reset`
//!
//! Deletes every status record. Irreversible, so it takes two steps: the
//! `--confirm` flag, then typing `ja` at the prompt (or `--yes` for
//! scripts). The name list is kept.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;

use crate::session::Session;

/// Answer that confirms the reset at the prompt.
pub const CONFIRM_WORD: &str = "ja";

#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Step one: request deletion of all status records.
    #[arg(long)]
    pub confirm: bool,

    /// Skip the interactive prompt.
    #[arg(long, requires = "confirm")]
    pub yes: bool,
}

/// Execute `gsd reset`.
pub fn run_reset(args: &ResetArgs, session: &Session) -> Result<u8> {
    let stdin = std::io::stdin();
    run_reset_with(args, session, &mut stdin.lock())
}

/// [`run_reset`] with the confirmation read from `input`.
pub fn run_reset_with(args: &ResetArgs, session: &Session, input: &mut dyn BufRead) -> Result<u8> {
    if !args.confirm {
        eprintln!("Datenbank zurücksetzen löscht alle Statuseinträge unwiderruflich.");
        eprintln!("Zum Fortfahren erneut mit --confirm aufrufen.");
        return Ok(1);
    }

    if !args.yes {
        eprint!("Alle Daten löschen? Zur Bestätigung '{CONFIRM_WORD}' eingeben: ");
        std::io::stderr().flush().ok();
        if !read_confirmation(input).context("failed to read confirmation")? {
            eprintln!("Abgebrochen, nichts gelöscht.");
            return Ok(1);
        }
    }

    let removed = session
        .store()?
        .reset_all()
        .context("failed to reset status database")?;
    println!("{removed} Statuseinträge gelöscht.");
    Ok(0)
}

/// Read one line and check it against [`CONFIRM_WORD`] (case-insensitive).
pub fn read_confirmation(input: &mut dyn BufRead) -> std::io::Result<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case(CONFIRM_WORD))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_accepts_ja_only() {
        assert!(read_confirmation(&mut "ja\n".as_bytes()).unwrap());
        assert!(read_confirmation(&mut "  JA  \n".as_bytes()).unwrap());
        assert!(!read_confirmation(&mut "j\n".as_bytes()).unwrap());
        assert!(!read_confirmation(&mut "yes\n".as_bytes()).unwrap());
        assert!(!read_confirmation(&mut "".as_bytes()).unwrap());
    }
}
