//! Dial ring geometry preview.

use anyhow::Result;
use clap::Parser;
use console::style;

use combat_core::{HourSlot, Position, QuarterTurns, SimConfig, ring_positions};

use super::parse_position;

/// Print the dial hour ring for a caster and a target
#[derive(Parser)]
pub struct Ring {
    /// Dial target tile, which becomes the ring centre (e.g. 8,9)
    #[arg(value_name = "X,Y")]
    target: String,

    /// Caster tile; the caster-to-target vector sets the orientation
    #[arg(short, long, value_name = "X,Y", default_value = "6,6")]
    caster: String,

    /// Side length of the square board
    #[arg(short, long, default_value_t = SimConfig::DEFAULT_BOARD_SIZE)]
    board_size: i32,

    /// Also draw the board with the ring on it
    #[arg(short, long)]
    grid: bool,
}

impl Ring {
    pub fn execute(self) -> Result<()> {
        let caster = parse_position(&self.caster)?;
        let target = parse_position(&self.target)?;
        if !target.in_bounds(self.board_size) {
            anyhow::bail!(
                "Target {} is outside a {}x{} board",
                target,
                self.board_size,
                self.board_size
            );
        }

        let orientation = QuarterTurns::between(caster, target);
        let slots = ring_positions(target, orientation, self.board_size);

        println!(
            "{} {} -> {}",
            style("Cast:").bold().cyan(),
            caster,
            target
        );
        println!(
            "{} {}° ({} quarter turns)",
            style("Orientation:").bold().cyan(),
            orientation.degrees(),
            orientation.get()
        );
        println!(
            "{} {}/{}",
            style("Hours on board:").bold().cyan(),
            slots.len(),
            SimConfig::DIAL_HOURS
        );
        println!();

        for hour in 1..=SimConfig::DIAL_HOURS as u8 {
            match slots.iter().find(|slot| slot.hour == hour) {
                Some(slot) => println!("  {:>2}h  {}", hour, slot.position),
                None => println!("  {:>2}h  {}", hour, style("off board").dim()),
            }
        }

        if self.grid {
            println!();
            print_grid(self.board_size, caster, target, &slots);
        }

        Ok(())
    }
}

fn print_grid(board_size: i32, caster: Position, center: Position, slots: &[HourSlot]) {
    for y in 0..board_size {
        let mut row = String::new();
        for x in 0..board_size {
            let position = Position::new(x, y);
            let cell = if position == center {
                style(" D ".to_string()).bold().magenta()
            } else if let Some(slot) = slots.iter().find(|slot| slot.position == position) {
                style(format!("{:>2} ", slot.hour)).yellow()
            } else if position == caster {
                style(" @ ".to_string()).bold().green()
            } else {
                style(" . ".to_string()).dim()
            };
            row.push_str(&cell.to_string());
        }
        println!("{}", row);
    }
}
