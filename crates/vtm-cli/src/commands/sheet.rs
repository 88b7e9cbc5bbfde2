use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use vtm_mechanics::StatBlock;
use vtm_mechanics::sheet::HUNGER_MAX;

use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let service = ctx.service()?;
    let sheet = service
        .sheet(&ctx.character)
        .map_err(|e| e.to_string())?;

    println!(
        "  {} {}",
        sheet.name.bold(),
        format!("({})", ctx.character).dimmed()
    );
    let clan = if sheet.clan.is_empty() {
        "—"
    } else {
        sheet.clan.as_str()
    };
    println!("  Clan: {clan}  Generation: {}", sheet.generation);
    println!();

    println!("  {}", "Attributes".bold().underline());
    println!("{}", stat_table(&sheet.attributes));
    println!();
    println!("  {}", "Skills".bold().underline());
    println!("{}", stat_table(&sheet.skills));
    println!();

    let hunger = format!("Hunger {}/{HUNGER_MAX}", sheet.hunger);
    let hunger = if sheet.hunger >= HUNGER_MAX {
        hunger.red().bold()
    } else {
        hunger.normal()
    };
    println!(
        "  {hunger}  Willpower {}/{}  Health {}/{}  Humanity {}  Blood Potency {}",
        sheet.willpower,
        sheet.willpower_max,
        sheet.health,
        sheet.health_max,
        sheet.humanity,
        sheet.blood_potency
    );

    Ok(())
}

/// One column per category, one rating per cell.
fn stat_table(block: &StatBlock) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Physical", "Social", "Mental"]);

    let columns: Vec<Vec<String>> = block
        .categories()
        .iter()
        .map(|(_, ratings)| ratings.iter().map(|(k, v)| format!("{k} {v}")).collect())
        .collect();
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    for i in 0..rows {
        let row: Vec<String> = columns
            .iter()
            .map(|col| col.get(i).cloned().unwrap_or_default())
            .collect();
        table.add_row(row);
    }
    table
}
