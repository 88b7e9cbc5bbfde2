use comfy_table::{ContentArrangement, Table};
use vtm_session::JsonFileStore;

use super::Context;

pub fn run(
    ctx: &Context,
    auto_save: Option<bool>,
    show_details: Option<bool>,
    default_difficulty: Option<u32>,
) -> Result<(), String> {
    let mut store = JsonFileStore::open(&ctx.store).map_err(|e| e.to_string())?;
    let mut settings = store.settings().clone();

    if let Some(auto_save) = auto_save {
        settings = settings.with_auto_save(auto_save);
    }
    if let Some(show) = show_details {
        settings = settings.with_roll_details(show);
    }
    if let Some(difficulty) = default_difficulty {
        settings = settings.with_default_difficulty(difficulty);
    }
    if auto_save.is_some() || show_details.is_some() || default_difficulty.is_some() {
        store
            .set_settings(settings.clone())
            .map_err(|e| e.to_string())?;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["auto-save".to_string(), settings.auto_save.to_string()]);
    table.add_row(vec![
        "show-details".to_string(),
        settings.show_roll_details.to_string(),
    ]);
    table.add_row(vec![
        "default-difficulty".to_string(),
        settings.default_difficulty.to_string(),
    ]);
    println!("{table}");
    Ok(())
}
