use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::models::{
    DnsConfig, DnsConfigDnsContainerAppAlias, DnsConfigDnsVmAppAlias, DnsContainerAppAlias,
    DnsVmAppAlias,
};
use crate::state::ControllerState;

pub mod collection;
pub mod error;
pub mod health;

use collection::{Collection, LinkCollection};

pub fn http_router(state: ControllerState) -> Router {
    let router = Router::new().route("/health", get(health::health));

    let router = entity_routes::<DnsConfig>(router);
    let router = entity_routes::<DnsVmAppAlias>(router);
    let router = entity_routes::<DnsContainerAppAlias>(router);
    let router = association_routes::<DnsConfigDnsVmAppAlias>(router);
    let router = association_routes::<DnsConfigDnsContainerAppAlias>(router);

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn entity_routes<E: Collection>(router: Router<ControllerState>) -> Router<ControllerState> {
    router
        .route(
            &format!("/{}", E::table_name()),
            post(collection::create::<E>)
                .get(collection::list::<E>)
                .patch(collection::update::<E>),
        )
        .route(
            &format!("/{}/:id", E::table_name()),
            get(collection::get::<E>).delete(collection::delete::<E>),
        )
}

/// Association records are immutable, so there is no PATCH.
fn association_routes<A>(router: Router<ControllerState>) -> Router<ControllerState>
where
    A: LinkCollection,
    A::Left: Collection,
    A::Right: Collection,
{
    router
        .route(
            &format!("/{}", A::table_name()),
            post(collection::link::<A>).get(collection::list_links::<A>),
        )
        .route(
            &format!("/{}/:id", A::table_name()),
            get(collection::get_link::<A>).delete(collection::delete_link::<A>),
        )
}
