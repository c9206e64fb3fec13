//! Command implementations for combat-sim
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod catalog;
mod ring;
mod run;

pub use catalog::Catalog;
pub use ring::Ring;
pub use run::Run;

use std::path::Path;

use anyhow::{Context, Result};
use combat_core::Position;

/// Default location of the bundled content, relative to the working directory.
pub(crate) const DEFAULT_DATA_DIR: &str = "crates/combat/content/data";

/// Parses `x,y` into a [`Position`].
pub(crate) fn parse_position(raw: &str) -> Result<Position> {
    let (x, y) = raw
        .split_once(',')
        .with_context(|| format!("expected `x,y`, got `{}`", raw))?;
    let x = x
        .trim()
        .parse()
        .with_context(|| format!("invalid x coordinate in `{}`", raw))?;
    let y = y
        .trim()
        .parse()
        .with_context(|| format!("invalid y coordinate in `{}`", raw))?;
    Ok(Position::new(x, y))
}

pub(crate) fn data_dir_exists(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!(
            "Data directory not found: {}\n\nHint: pass --data-dir or set COMBAT_DATA_DIR",
            dir.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_parse_with_spaces() {
        assert_eq!(parse_position("9, 6").unwrap(), Position::new(9, 6));
        assert_eq!(parse_position("-1,0").unwrap(), Position::new(-1, 0));
    }

    #[test]
    fn malformed_positions_are_rejected() {
        assert!(parse_position("9").is_err());
        assert!(parse_position("a,2").is_err());
    }
}
