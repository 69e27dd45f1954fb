//! Delete and clear commands

use super::Workspace;
use crate::ledger::{ClearOutcome, Confirmation};
use anyhow::{Context, Result};
use console::{style, Term};

pub fn run(ws: &Workspace, id: &str) -> Result<()> {
    let mut ledger = ws.open_ledger()?;

    if ledger.delete(id)? {
        println!("{} Deleted {}", style("✓").green(), style(id).dim());
    } else {
        println!("{} No material with id {}", style("-").dim(), style(id).dim());
    }
    Ok(())
}

/// Clear the ledger. Without `--yes` the operator is asked first.
pub fn clear(ws: &Workspace, yes: bool) -> Result<()> {
    let mut ledger = ws.open_ledger()?;

    let confirmation = if yes {
        Confirmation::Confirmed
    } else {
        prompt_confirmation(ledger.len())?
    };

    match ledger.clear_all(confirmation)? {
        ClearOutcome::Cleared { removed } => {
            println!(
                "{} Cleared {} materials",
                style("✓").green(),
                style(removed).cyan()
            );
        }
        ClearOutcome::Cancelled => {
            println!("{} Nothing removed", style("-").dim());
        }
    }
    Ok(())
}

fn prompt_confirmation(count: usize) -> Result<Confirmation> {
    let term = Term::stderr();
    term.write_str(&format!(
        "{} This will wipe all LEED data ({} materials). [y/N] ",
        style("CRITICAL: Are you sure?").red().bold(),
        count
    ))?;
    // Non-interactive terminals read as an empty answer
    let answer = term.read_line().context("Failed to read confirmation")?;
    Ok(parse_answer(&answer))
}

fn parse_answer(answer: &str) -> Confirmation {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes").into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("y"), Confirmation::Confirmed);
        assert_eq!(parse_answer(" YES \n"), Confirmation::Confirmed);
        assert_eq!(parse_answer(""), Confirmation::Declined);
        assert_eq!(parse_answer("n"), Confirmation::Declined);
        assert_eq!(parse_answer("sure"), Confirmation::Declined);
    }
}
