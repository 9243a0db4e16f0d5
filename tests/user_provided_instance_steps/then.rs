//! Then steps for user-provided instance BDD scenarios.

use super::world::{InstanceWorld, run_async};
use plinth::{
    message::create::REDACTED_CREDENTIALS, service_instance::ports::ServiceInstanceRepository,
};
use rstest_bdd_macros::then;
use serde_json::Value;

#[then(r#"the instance "{name}" is stored in space "{space}""#)]
fn instance_is_stored(world: &InstanceWorld, name: String, space: String) -> Result<(), eyre::Report> {
    let created = match world.last_result.as_ref() {
        Some(Ok(instance)) => instance,
        Some(Err(err)) => return Err(eyre::eyre!("expected a created instance, got {err}")),
        None => return Err(eyre::eyre!("missing create result")),
    };
    let stored = run_async(world.instances.find_by_guid(created.guid()))?
        .ok_or_else(|| eyre::eyre!("created instance is not in the store"))?;

    if stored.name() != name || stored.space_guid() != space {
        return Err(eyre::eyre!(
            "expected {name} in {space}, found {} in {}",
            stored.name(),
            stored.space_guid()
        ));
    }
    Ok(())
}

#[then("one audit event is recorded with hidden credentials")]
fn one_redacted_event(world: &InstanceWorld) -> Result<(), eyre::Report> {
    let events = world.events.events()?;
    let [event] = events.as_slice() else {
        return Err(eyre::eyre!("expected one audit event, found {}", events.len()));
    };
    let credentials = event.request.get("credentials").and_then(Value::as_str);
    if credentials != Some(REDACTED_CREDENTIALS) {
        return Err(eyre::eyre!(
            "expected hidden credentials, found {credentials:?}"
        ));
    }
    Ok(())
}

#[then("creation fails with API error {code:u32}")]
fn creation_fails_with(world: &InstanceWorld, code: u32) -> Result<(), eyre::Report> {
    let err = match world.last_result.as_ref() {
        Some(Err(err)) => err,
        Some(Ok(instance)) => {
            return Err(eyre::eyre!(
                "expected creation to fail, created {}",
                instance.guid()
            ));
        }
        None => return Err(eyre::eyre!("missing create result")),
    };
    let api_error = err
        .to_api_error()
        .ok_or_else(|| eyre::eyre!("{err} is not a client error"))?;
    if api_error.code != code {
        return Err(eyre::eyre!("expected code {code}, got {api_error}"));
    }
    Ok(())
}

#[then("{count:usize} instance is stored")]
fn one_instance_stored(world: &InstanceWorld, count: usize) -> Result<(), eyre::Report> {
    instances_stored(world, count)
}

#[then("{count:usize} instances are stored")]
fn instances_stored(world: &InstanceWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = world.instances.instance_count()?;
    if stored != count {
        return Err(eyre::eyre!("expected {count} stored instances, found {stored}"));
    }
    Ok(())
}

#[then("no audit event is recorded")]
fn no_event(world: &InstanceWorld) -> Result<(), eyre::Report> {
    let events = world.events.events()?;
    if !events.is_empty() {
        return Err(eyre::eyre!("expected no audit events, found {}", events.len()));
    }
    Ok(())
}
