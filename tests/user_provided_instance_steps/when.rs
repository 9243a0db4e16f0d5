//! When steps for user-provided instance BDD scenarios.

use super::world::{InstanceWorld, run_async};
use plinth::{
    message::{
        RequestMessage, create::UserProvidedServiceInstanceCreateMessage, domain::RawParams,
    },
    service_instance::domain::UserAuditInfo,
};
use rstest_bdd_macros::when;

#[when(r#"user "{user_guid}" creates the instance"#)]
fn user_creates_instance(world: &mut InstanceWorld, user_guid: String) -> Result<(), eyre::Report> {
    let body = world
        .pending_body
        .clone()
        .ok_or_else(|| eyre::eyre!("missing pending request body in scenario world"))?;
    let message = UserProvidedServiceInstanceCreateMessage::from_params(&RawParams::from_json(body)?);

    let result = run_async(
        world
            .action()
            .create(&message, &UserAuditInfo::new(user_guid)),
    );
    world.last_result = Some(result);
    Ok(())
}
