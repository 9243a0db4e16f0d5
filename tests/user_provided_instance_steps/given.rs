//! Given steps for user-provided instance BDD scenarios.

use std::sync::Arc;

use super::world::{InstanceWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use plinth::service_instance::{
    adapters::memory::InMemoryServiceInstanceRepository,
    domain::{ServiceInstance, UserProvidedInstanceDraft},
    ports::ServiceInstanceRepository,
};
use rstest_bdd_macros::given;
use serde_json::{Value, json};

#[given(r#"the platform has a space "{space}""#)]
fn platform_has_space(world: &mut InstanceWorld, space: String) {
    world.instances = Arc::new(InMemoryServiceInstanceRepository::with_spaces([space]));
}

#[given(r#"an instance "{name}" already exists in space "{space}""#)]
fn instance_exists(
    world: &mut InstanceWorld,
    name: String,
    space: String,
) -> Result<(), eyre::Report> {
    let draft = UserProvidedInstanceDraft::new(name, space)
        .wrap_err("build draft for existing instance")?;
    let instance = ServiceInstance::create(draft, &DefaultClock);
    run_async(world.instances.create_user_provided(&instance))
        .wrap_err("store existing instance")?;
    Ok(())
}

#[given(r#"a create request for "{name}" in space "{space}""#)]
fn create_request(world: &mut InstanceWorld, name: String, space: String) {
    world.pending_body = Some(json!({
        "type": "user-provided",
        "name": name,
        "credentials": { "password": "s3cret" },
        "relationships": { "space": { "data": { "guid": space } } }
    }));
}

#[given(r#"the request sets the route service URL to "{url}""#)]
fn request_sets_route_service(world: &mut InstanceWorld, url: String) -> Result<(), eyre::Report> {
    let body = world
        .pending_body
        .as_mut()
        .and_then(Value::as_object_mut)
        .ok_or_else(|| eyre::eyre!("missing pending request body in scenario world"))?;
    body.insert("route_service_url".to_owned(), Value::String(url));
    Ok(())
}
