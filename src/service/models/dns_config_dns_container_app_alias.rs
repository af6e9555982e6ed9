use edgectl_core::{JoinModel, PersistableModel};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    join_table_name, validate_uuid, Association, DnsConfig, DnsContainerAppAlias, Entity,
};
use crate::error::ValidationError;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct DnsConfigDnsContainerAppAlias {
    pub id: String,
    pub dns_config_id: String,
    pub dns_container_app_alias_id: String,
}

impl PersistableModel for DnsConfigDnsContainerAppAlias {
    fn get_id(&self) -> String {
        self.id.clone()
    }
}

impl JoinModel for DnsConfigDnsContainerAppAlias {
    fn foreign_keys(&self) -> [&str; 2] {
        [
            self.dns_config_id.as_str(),
            self.dns_container_app_alias_id.as_str(),
        ]
    }
}

impl Entity for DnsConfigDnsContainerAppAlias {
    const KIND: &'static str = "dns_config_dns_container_app_alias";

    fn table_name() -> String {
        join_table_name::<DnsConfig, DnsContainerAppAlias>()
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_uuid("id", &self.id)?;
        validate_uuid("dns_config_id", &self.dns_config_id)?;
        validate_uuid("dns_container_app_alias_id", &self.dns_container_app_alias_id)?;

        Ok(())
    }
}

impl Association for DnsConfigDnsContainerAppAlias {
    type Left = DnsConfig;
    type Right = DnsContainerAppAlias;
}

impl fmt::Display for DnsConfigDnsContainerAppAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DnsConfigDnsContainerAppAlias[\n    id: {}\n    dns_config_id: {}\n    dns_container_app_alias_id: {}\n]",
            self.id, self.dns_config_id, self.dns_container_app_alias_id
        )
    }
}
