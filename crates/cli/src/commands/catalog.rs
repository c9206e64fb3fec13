//! Spell catalog listing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use combat_content::{ContentFactory, SpellCatalog};

use super::data_dir_exists;

/// List the spells of a catalog
#[derive(Parser)]
pub struct Catalog {
    /// Data directory to load `spells/<NAME>.ron` from; the embedded catalog
    /// is used when omitted
    #[arg(short, long, value_name = "DIR", env = "COMBAT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Catalog file name under `spells/`
    #[arg(short, long, value_name = "NAME", default_value = "xelor")]
    spells: String,

    /// Print the catalog as JSON
    #[arg(long)]
    json: bool,
}

impl Catalog {
    pub fn execute(self) -> Result<()> {
        let catalog = match &self.data_dir {
            Some(dir) => {
                data_dir_exists(dir)?;
                ContentFactory::new(dir).load_spells(&self.spells)?
            }
            None => SpellCatalog::embedded()?,
        };

        if self.json {
            let profiles: Vec<_> = catalog.profiles().collect();
            let json = serde_json::to_string_pretty(&profiles)
                .context("Failed to serialize catalog to JSON")?;
            println!("{}", json);
            return Ok(());
        }

        println!(
            "{} {} spells",
            style("Catalog:").bold().cyan(),
            catalog.len()
        );
        println!();
        println!(
            "  {:<16} {:>3} {:>3} {:>5}  {:<10} {}",
            style("id").bold(),
            style("AP").bold(),
            style("WP").bold(),
            style("dmg").bold(),
            style("mechanism").bold(),
            style("grants").bold()
        );
        for spell in catalog.profiles() {
            let mechanism = spell
                .mechanism
                .map(|kind| kind.to_string())
                .unwrap_or_else(|| "-".to_string());
            let grants = spell
                .grants
                .iter()
                .map(|grant| format!("+{} {}", grant.amount, grant.kind))
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "  {:<16} {:>3} {:>3} {:>5}  {:<10} {}",
                spell.id, spell.ap_cost, spell.wp_cost, spell.base_damage, mechanism, grants
            );
        }

        Ok(())
    }
}
