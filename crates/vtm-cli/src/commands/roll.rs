use colored::Colorize;
use vtm_mechanics::RollAction;
use vtm_session::{ReportDetail, RollReport};

use super::Context;

/// Build the action from the store's default difficulty, roll it and print the report.
pub fn run(ctx: &Context, action: impl FnOnce(i32) -> RollAction) -> Result<(), String> {
    let service = ctx.service()?;
    let default_difficulty = i32::try_from(service.settings().default_difficulty).unwrap_or(2);
    let action = action(default_difficulty);
    let mut dice = ctx.dice()?;

    let report = service
        .perform(&ctx.character, &action, dice.as_mut())
        .map_err(|e| e.to_string())?;

    let won = report_won(&report);
    for (i, line) in report.render(service.settings()).lines().enumerate() {
        if i == 0 {
            println!("  {}", line.bold());
        } else if line.contains("Beast") {
            println!("  {}", line.red().bold());
        } else if line.starts_with("Successes:") || line.starts_with("Roll:") {
            if won {
                println!("  {}", line.green());
            } else {
                println!("  {}", line.red());
            }
        } else {
            println!("  {line}");
        }
    }
    Ok(())
}

fn report_won(report: &RollReport) -> bool {
    match &report.detail {
        ReportDetail::Rouse(rouse) => rouse.success,
        ReportDetail::Frenzy(frenzy) => !frenzy.lost_control,
        ReportDetail::Pool(roll) => roll.is_win(),
        ReportDetail::Skill(skill) => skill.roll.is_win(),
    }
}
