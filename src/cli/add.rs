//! Add command - record a new material

use super::{AddArgs, Workspace};
use crate::models::MaterialDraft;
use crate::reporters::format_currency;
use anyhow::Result;
use console::style;

impl From<AddArgs> for MaterialDraft {
    fn from(args: AddArgs) -> Self {
        Self {
            name: args.name,
            category: args.category,
            cost: args.cost,
            weight: args.weight,
            embodied_carbon: args.embodied_carbon,
            transport_distance: args.transport_distance,
            recycled_content_pre: args.recycled_pre,
            recycled_content_post: args.recycled_post,
            is_locally_sourced: args.local,
            has_epd: args.epd,
            supplier_name: args.supplier,
            supplier_location: args.supplier_location,
        }
    }
}

pub fn run(ws: &Workspace, args: AddArgs) -> Result<()> {
    let mut ledger = ws.open_ledger()?;
    let material = MaterialDraft::from(args).into_material();

    match ledger.add(material) {
        Ok(added) => {
            println!(
                "{} Added {} {} ({}, {})",
                style("✓").green(),
                style(&added.name).bold(),
                style(&added.id).dim(),
                added.category_label(),
                format_currency(added.cost, ws.config.currency())
            );
        }
        Err(e) => {
            eprintln!("{} {}", style(ledger.sync_status().label()).red().bold(), e);
            return Err(e.into());
        }
    }

    eprintln!("{}", style(ledger.sync_status().label()).dim());
    Ok(())
}
