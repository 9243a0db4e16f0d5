//! Given steps for list query BDD scenarios.

use super::world::ListQueryWorld;
use plinth::message::domain::RawParams;
use rstest_bdd_macros::given;

#[given(r#"the query "{query}""#)]
fn the_query(world: &mut ListQueryWorld, query: String) {
    world.raw = Some(RawParams::from_query(&query));
}
