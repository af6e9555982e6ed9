// common protobufs

pub mod common {
    tonic::include_proto!("edgectl.common");
}

pub use common::{ApplicationId, Empty};

impl ApplicationId {
    pub fn new(id: &str) -> Self {
        ApplicationId { id: id.to_string() }
    }
}

// application protobufs

pub mod application {
    tonic::include_proto!("edgectl.application");
}

pub use application::application_server::{Application as ApplicationTrait, ApplicationServer};
pub use application::{
    ApplicationKind, ApplicationMessage, LifecycleCommand, LifecycleStatus,
    ListApplicationsResponse, PortMessage,
};

impl LifecycleCommand {
    pub fn new(id: &str) -> Self {
        LifecycleCommand { id: id.to_string() }
    }
}

// health protobufs

pub mod health {
    tonic::include_proto!("edgectl.health");
}

pub use health::health_server::{Health, HealthServer};
pub use health::{HealthRequest, HealthResponse};

// policy protobufs

pub mod policy {
    tonic::include_proto!("edgectl.policy");
}

pub use policy::application_policy_server::{
    ApplicationPolicy as ApplicationPolicyTrait, ApplicationPolicyServer,
};
pub use policy::{RuleAction, TrafficPolicyMessage, TrafficRuleMessage};
