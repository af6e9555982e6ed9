use edgectl_core::{JoinModel, PersistableModel};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{join_table_name, validate_uuid, Association, DnsConfig, DnsVmAppAlias, Entity};
use crate::error::ValidationError;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct DnsConfigDnsVmAppAlias {
    pub id: String,
    pub dns_config_id: String,
    pub dns_vm_app_alias_id: String,
}

impl PersistableModel for DnsConfigDnsVmAppAlias {
    fn get_id(&self) -> String {
        self.id.clone()
    }
}

impl JoinModel for DnsConfigDnsVmAppAlias {
    fn foreign_keys(&self) -> [&str; 2] {
        [self.dns_config_id.as_str(), self.dns_vm_app_alias_id.as_str()]
    }
}

impl Entity for DnsConfigDnsVmAppAlias {
    const KIND: &'static str = "dns_config_dns_vm_app_alias";

    fn table_name() -> String {
        join_table_name::<DnsConfig, DnsVmAppAlias>()
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_uuid("id", &self.id)?;
        validate_uuid("dns_config_id", &self.dns_config_id)?;
        validate_uuid("dns_vm_app_alias_id", &self.dns_vm_app_alias_id)?;

        Ok(())
    }
}

impl Association for DnsConfigDnsVmAppAlias {
    type Left = DnsConfig;
    type Right = DnsVmAppAlias;
}

impl fmt::Display for DnsConfigDnsVmAppAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DnsConfigDnsVmAppAlias[\n    id: {}\n    dns_config_id: {}\n    dns_vm_app_alias_id: {}\n]",
            self.id, self.dns_config_id, self.dns_vm_app_alias_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_fixture() -> DnsConfigDnsVmAppAlias {
        DnsConfigDnsVmAppAlias {
            id: "8066699a-e81d-4d1f-b860-3ff836c0409f".to_owned(),
            dns_config_id: "84c1f7b9-53e7-408e-9223-deab73befc54".to_owned(),
            dns_vm_app_alias_id: "a48145cc-87de-4aa9-814d-51d23a47eccd".to_owned(),
        }
    }

    #[test]
    fn test_table_name() {
        assert_eq!(
            DnsConfigDnsVmAppAlias::table_name(),
            "dns_configs_dns_vm_app_aliases"
        );
        assert_eq!(DnsConfigDnsVmAppAlias::left_field(), "dns_config_id");
        assert_eq!(DnsConfigDnsVmAppAlias::right_field(), "dns_vm_app_alias_id");
    }

    #[test]
    fn test_references() {
        let link = link_fixture();

        assert!(link.references("84c1f7b9-53e7-408e-9223-deab73befc54"));
        assert!(link.references("a48145cc-87de-4aa9-814d-51d23a47eccd"));
        assert!(!link.references("8066699a-e81d-4d1f-b860-3ff836c0409f"));
    }

    #[test]
    fn test_validate() {
        let mut link = link_fixture();
        link.dns_vm_app_alias_id = "123".to_owned();
        assert_eq!(
            link.validate().unwrap_err().to_string(),
            "dns_vm_app_alias_id not a valid uuid"
        );

        link.dns_config_id = String::new();
        assert_eq!(
            link.validate().unwrap_err().to_string(),
            "dns_config_id not a valid uuid"
        );
    }
}
