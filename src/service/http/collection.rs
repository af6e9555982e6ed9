use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::HttpResult;
use crate::models::{
    Association, DnsConfig, DnsConfigDnsContainerAppAlias, DnsConfigDnsVmAppAlias,
    DnsContainerAppAlias, DnsVmAppAlias, Entity,
};
use crate::services::{AssociationIndex, Repository};
use crate::state::ControllerState;

/// An entity kind served as a REST collection under `/{table_name}`.
pub trait Collection: Entity {
    fn repository(state: &ControllerState) -> &Repository<Self>;
}

/// An association kind whose records are created by linking two existing
/// entities and are never rewritten afterwards.
pub trait LinkCollection: Association {
    fn index(state: &ControllerState) -> &AssociationIndex<Self>;
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreatedId {
    pub id: String,
}

impl Collection for DnsConfig {
    fn repository(state: &ControllerState) -> &Repository<Self> {
        &state.dns_configs
    }
}

impl Collection for DnsVmAppAlias {
    fn repository(state: &ControllerState) -> &Repository<Self> {
        &state.dns_vm_app_aliases
    }
}

impl Collection for DnsContainerAppAlias {
    fn repository(state: &ControllerState) -> &Repository<Self> {
        &state.dns_container_app_aliases
    }
}

impl LinkCollection for DnsConfigDnsVmAppAlias {
    fn index(state: &ControllerState) -> &AssociationIndex<Self> {
        &state.dns_config_vm_aliases
    }
}

impl LinkCollection for DnsConfigDnsContainerAppAlias {
    fn index(state: &ControllerState) -> &AssociationIndex<Self> {
        &state.dns_config_container_aliases
    }
}

#[tracing::instrument(name = "http::collection::create", skip_all, fields(collection = %E::table_name()))]
pub async fn create<E: Collection>(
    State(state): State<ControllerState>,
    payload: Result<Json<E>, JsonRejection>,
) -> HttpResult<(StatusCode, Json<CreatedId>)> {
    let Json(entity) = payload?;

    let id = E::repository(&state)
        .create(&state.context(), entity)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}

#[tracing::instrument(name = "http::collection::link", skip_all, fields(collection = %A::table_name()))]
pub async fn link<A>(
    State(state): State<ControllerState>,
    payload: Result<Json<A>, JsonRejection>,
) -> HttpResult<(StatusCode, Json<CreatedId>)>
where
    A: LinkCollection,
    A::Left: Collection,
    A::Right: Collection,
{
    let Json(record) = payload?;

    let id = A::index(&state)
        .link(
            &state.context(),
            record,
            <A::Left as Collection>::repository(&state),
            <A::Right as Collection>::repository(&state),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}

#[tracing::instrument(name = "http::collection::list", skip_all, fields(collection = %E::table_name()))]
pub async fn list<E: Collection>(State(state): State<ControllerState>) -> HttpResult<Json<Vec<E>>> {
    let entities = E::repository(&state).list(&state.context()).await?;

    Ok(Json(entities))
}

#[tracing::instrument(name = "http::collection::get", skip(state), fields(collection = %E::table_name()))]
pub async fn get<E: Collection>(
    State(state): State<ControllerState>,
    Path(id): Path<String>,
) -> HttpResult<Json<E>> {
    let entity = E::repository(&state)
        .get_by_id(&state.context(), &id)
        .await?;

    Ok(Json(entity))
}

#[tracing::instrument(name = "http::collection::update", skip_all, fields(collection = %E::table_name()))]
pub async fn update<E: Collection>(
    State(state): State<ControllerState>,
    payload: Result<Json<Vec<E>>, JsonRejection>,
) -> HttpResult<StatusCode> {
    let Json(entities) = payload?;

    E::repository(&state)
        .update(&state.context(), entities)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(name = "http::collection::delete", skip(state), fields(collection = %E::table_name()))]
pub async fn delete<E: Collection>(
    State(state): State<ControllerState>,
    Path(id): Path<String>,
) -> HttpResult<StatusCode> {
    E::repository(&state).delete(&state.context(), &id).await?;

    Ok(StatusCode::OK)
}

#[tracing::instrument(name = "http::collection::list_links", skip_all, fields(collection = %A::table_name()))]
pub async fn list_links<A: LinkCollection>(
    State(state): State<ControllerState>,
) -> HttpResult<Json<Vec<A>>> {
    let records = A::index(&state).list(&state.context()).await?;

    Ok(Json(records))
}

#[tracing::instrument(name = "http::collection::get_link", skip(state), fields(collection = %A::table_name()))]
pub async fn get_link<A: LinkCollection>(
    State(state): State<ControllerState>,
    Path(id): Path<String>,
) -> HttpResult<Json<A>> {
    let record = A::index(&state).get_by_id(&state.context(), &id).await?;

    Ok(Json(record))
}

#[tracing::instrument(name = "http::collection::delete_link", skip(state), fields(collection = %A::table_name()))]
pub async fn delete_link<A: LinkCollection>(
    State(state): State<ControllerState>,
    Path(id): Path<String>,
) -> HttpResult<StatusCode> {
    A::index(&state).delete(&state.context(), &id).await?;

    Ok(StatusCode::OK)
}
