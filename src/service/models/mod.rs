use std::fmt::Display;

use edgectl_core::{JoinModel, PersistableModel};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ValidationError;

mod application;
mod dns_config;
mod dns_config_dns_container_app_alias;
mod dns_config_dns_vm_app_alias;
mod dns_container_app_alias;
mod dns_vm_app_alias;
mod policy;

pub use application::{Application, ApplicationKind, LifecycleStatus, Port};
pub use dns_config::{DnsARecord, DnsConfig, DnsForwarder};
pub use dns_config_dns_container_app_alias::DnsConfigDnsContainerAppAlias;
pub use dns_config_dns_vm_app_alias::DnsConfigDnsVmAppAlias;
pub use dns_container_app_alias::DnsContainerAppAlias;
pub use dns_vm_app_alias::DnsVmAppAlias;
pub use policy::{Policy, RuleAction, TrafficRule};

/// `validate` checks its rules in a fixed order (identity, required strings,
/// foreign keys) and stops at the first failure.
pub trait Entity: PersistableModel + Display + Serialize + DeserializeOwned {
    const KIND: &'static str;

    fn table_name() -> String;
    fn set_id(&mut self, id: &str);
    fn validate(&self) -> Result<(), ValidationError>;
}

/// A join record linking a `Left` entity to a `Right` entity. Its
/// `foreign_keys` are ordered `[left, right]`.
pub trait Association: Entity + JoinModel {
    type Left: Entity;
    type Right: Entity;

    fn left_field() -> String {
        foreign_key_field::<Self::Left>()
    }

    fn right_field() -> String {
        foreign_key_field::<Self::Right>()
    }
}

pub fn join_table_name<Left: Entity, Right: Entity>() -> String {
    format!("{}_{}", Left::table_name(), Right::table_name())
}

pub fn foreign_key_field<Referenced: Entity>() -> String {
    format!("{}_id", Referenced::KIND)
}

pub(crate) fn validate_uuid(field: &str, value: &str) -> Result<(), ValidationError> {
    if !edgectl_core::uuid::is_valid(value) {
        return Err(ValidationError::new(field, ValidationError::NOT_A_VALID_UUID));
    }

    Ok(())
}

pub(crate) fn validate_not_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, ValidationError::CANNOT_BE_EMPTY));
    }

    Ok(())
}
