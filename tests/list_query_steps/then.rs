//! Then steps for list query BDD scenarios.

use super::world::ListQueryWorld;
use plinth::message::normalization::split_comma_list;
use rstest_bdd_macros::then;

#[then("the message is valid")]
fn message_is_valid(world: &ListQueryWorld) -> Result<(), eyre::Report> {
    let parsed = world.parsed()?;
    if !parsed.is_valid() {
        return Err(eyre::eyre!("unexpected errors: {}", parsed.errors()));
    }
    Ok(())
}

#[then(r#"the "{field}" filter lists "{values}""#)]
fn filter_lists(world: &ListQueryWorld, field: String, values: String) -> Result<(), eyre::Report> {
    let expected = split_comma_list(&values);
    let actual = world.parsed()?.list(&field);
    if actual != Some(expected.as_slice()) {
        return Err(eyre::eyre!("expected {field} = {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the page is {page:i64}")]
fn page_is(world: &ListQueryWorld, page: i64) -> Result<(), eyre::Report> {
    let actual = world.parsed()?.integer("page");
    if actual != Some(page) {
        return Err(eyre::eyre!("expected page {page}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the base error is "{message}""#)]
fn base_error_is(world: &ListQueryWorld, message: String) -> Result<(), eyre::Report> {
    let errors = world.parsed()?.errors();
    if errors.base() != [message.as_str()] {
        return Err(eyre::eyre!("expected base error {message:?}, found {errors}"));
    }
    Ok(())
}

#[then(r#"the "{field}" error is "{message}""#)]
fn field_error_is(world: &ListQueryWorld, field: String, message: String) -> Result<(), eyre::Report> {
    let errors = world.parsed()?.errors();
    if errors.on(&field) != [message.as_str()] {
        return Err(eyre::eyre!("expected {field} error {message:?}, found {errors}"));
    }
    Ok(())
}
