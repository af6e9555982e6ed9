use edgectl_core::PersistableModel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

use super::{validate_not_empty, validate_uuid, Entity};
use crate::error::ValidationError;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct DnsARecord {
    pub name: String,
    pub description: String,
    pub ips: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct DnsForwarder {
    pub name: String,
    pub description: String,
    pub ip: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct DnsConfig {
    pub id: String,
    pub name: String,
    pub a_records: Vec<DnsARecord>,
    pub forwarders: Vec<DnsForwarder>,
}

impl PersistableModel for DnsConfig {
    fn get_id(&self) -> String {
        self.id.clone()
    }
}

impl Entity for DnsConfig {
    const KIND: &'static str = "dns_config";

    fn table_name() -> String {
        "dns_configs".to_owned()
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_uuid("id", &self.id)?;
        validate_not_empty("name", &self.name)?;

        for (i, record) in self.a_records.iter().enumerate() {
            validate_not_empty(&format!("a_records[{i}].name"), &record.name)?;

            for (j, ip) in record.ips.iter().enumerate() {
                validate_ip(&format!("a_records[{i}].ips[{j}]"), ip)?;
            }
        }

        for (i, forwarder) in self.forwarders.iter().enumerate() {
            validate_not_empty(&format!("forwarders[{i}].name"), &forwarder.name)?;
            validate_ip(&format!("forwarders[{i}].ip"), &forwarder.ip)?;
        }

        Ok(())
    }
}

fn validate_ip(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.parse::<IpAddr>().is_err() {
        return Err(ValidationError::new(
            field,
            ValidationError::COULD_NOT_BE_PARSED,
        ));
    }

    Ok(())
}

impl fmt::Display for DnsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DnsConfig[\n    id: {}\n    name: {}\n    a_records: {:?}\n    forwarders: {:?}\n]",
            self.id, self.name, self.a_records, self.forwarders
        )
    }
}
