//! When steps for list query BDD scenarios.

use super::world::{ListQueryWorld, parse_list};
use rstest_bdd_macros::when;

#[when(r#"it is parsed as a "{kind}" list"#)]
fn parsed_as(world: &mut ListQueryWorld, kind: String) -> Result<(), eyre::Report> {
    let raw = world
        .raw
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing query in scenario world"))?;
    world.parsed = Some(parse_list(&kind, raw)?);
    Ok(())
}
