use edgectl_core::PersistableModel;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{validate_not_empty, validate_uuid, Entity};
use crate::error::ValidationError;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct DnsContainerAppAlias {
    pub id: String,
    pub name: String,
    pub description: String,
    pub container_app_id: String,
}

impl PersistableModel for DnsContainerAppAlias {
    fn get_id(&self) -> String {
        self.id.clone()
    }
}

impl Entity for DnsContainerAppAlias {
    const KIND: &'static str = "dns_container_app_alias";

    fn table_name() -> String {
        "dns_container_app_aliases".to_owned()
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_uuid("id", &self.id)?;
        validate_not_empty("name", &self.name)?;
        validate_not_empty("description", &self.description)?;
        validate_uuid("container_app_id", &self.container_app_id)?;

        Ok(())
    }
}

impl fmt::Display for DnsContainerAppAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DnsContainerAppAlias[\n    id: {}\n    name: {}\n    description: {}\n    container_app_id: {}\n]",
            self.id, self.name, self.description, self.container_app_id
        )
    }
}
