use vtm_mechanics::{CharacterSheet, MechError, Resource};
use vtm_session::{SessionError, SessionResult};

use super::Context;

pub fn run(ctx: &Context, field: &str, value: &str) -> Result<(), String> {
    let service = ctx.service()?;
    let message = service
        .update(&ctx.character, |sheet| apply(sheet, field, value))
        .map_err(|e| e.to_string())?;
    println!("  {message}");
    Ok(())
}

/// Text fields first, then resources, attributes and skills.
fn apply(sheet: &mut CharacterSheet, field: &str, value: &str) -> SessionResult<String> {
    let key: String = field
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect();

    let text_slot = match key.as_str() {
        "name" => Some(&mut sheet.name),
        "clan" => Some(&mut sheet.clan),
        "generation" => Some(&mut sheet.generation),
        "sire" => Some(&mut sheet.sire),
        "concept" => Some(&mut sheet.concept),
        "predatortype" => Some(&mut sheet.predator_type),
        "ambition" => Some(&mut sheet.ambition),
        "desire" => Some(&mut sheet.desire),
        _ => None,
    };
    if let Some(slot) = text_slot {
        *slot = value.to_string();
        return Ok(format!("{field} set to '{value}'"));
    }

    let number: u32 = value.parse().map_err(|_| {
        MechError::InvalidArgument(format!("expected a non-negative number, got '{value}'"))
    })?;

    if let Some(resource) = Resource::from_name(field) {
        let stored = sheet.set_resource(resource, number);
        return Ok(format!("{resource} set to {stored}"));
    }
    if let Some(stored) = sheet.set_attribute(field, number) {
        return Ok(format!("attribute {field} set to {stored}"));
    }
    if let Some(stored) = sheet.set_skill(field, number) {
        return Ok(format!("skill {field} set to {stored}"));
    }
    Err(SessionError::UnknownField(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_text_fields() {
        let mut sheet = CharacterSheet::default();
        apply(&mut sheet, "predator-type", "Alleycat").unwrap();
        apply(&mut sheet, "Clan", "Brujah").unwrap();
        assert_eq!(sheet.predator_type, "Alleycat");
        assert_eq!(sheet.clan, "Brujah");
    }

    #[test]
    fn sets_numbers_with_clamping() {
        let mut sheet = CharacterSheet::default();
        assert_eq!(apply(&mut sheet, "hunger", "7").unwrap(), "Hunger set to 5");
        apply(&mut sheet, "composure", "3").unwrap();
        apply(&mut sheet, "animal ken", "2").unwrap();
        assert_eq!(sheet.attribute("composure"), 3);
        assert_eq!(sheet.skill("animalKen"), 2);
        assert_eq!(
            apply(&mut sheet, "resolve", "4294967295").unwrap(),
            "attribute resolve set to 5"
        );
    }

    #[test]
    fn rejects_unknown_and_non_numeric() {
        let mut sheet = CharacterSheet::default();
        assert!(matches!(
            apply(&mut sheet, "charm", "2"),
            Err(SessionError::UnknownField(_))
        ));
        assert!(matches!(
            apply(&mut sheet, "hunger", "lots"),
            Err(SessionError::Mechanics(MechError::InvalidArgument(_)))
        ));
    }
}
