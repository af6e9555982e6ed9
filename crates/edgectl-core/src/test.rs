use crate::{
    ApplicationKind, ApplicationMessage, LifecycleStatus, PortMessage, RuleAction,
    TrafficPolicyMessage, TrafficRuleMessage,
};

pub fn get_container_app_fixture(name: Option<&str>) -> ApplicationMessage {
    let name = name.unwrap_or("container-app-fixture").to_string();

    ApplicationMessage {
        id: String::new(),
        name,
        version: "1.0.0".to_owned(),
        vendor: "smart edge".to_owned(),
        description: "container application fixture".to_owned(),
        image: "http://registry.local/nginx:1.25".to_owned(),
        cores: 2,
        memory: 1024,
        ports: vec![PortMessage {
            port: 80,
            protocol: "tcp".to_owned(),
        }],
        status: LifecycleStatus::Stopped as i32,
        kind: ApplicationKind::Container as i32,
    }
}

pub fn get_vm_app_fixture(name: Option<&str>) -> ApplicationMessage {
    let name = name.unwrap_or("vm-app-fixture").to_string();

    ApplicationMessage {
        id: String::new(),
        name,
        version: "2.1.0".to_owned(),
        vendor: "smart edge".to_owned(),
        description: "virtual machine application fixture".to_owned(),
        image: "http://registry.local/ubuntu-22.04.qcow2".to_owned(),
        cores: 4,
        memory: 4096,
        ports: vec![PortMessage {
            port: 22,
            protocol: "tcp".to_owned(),
        }],
        status: LifecycleStatus::Stopped as i32,
        kind: ApplicationKind::Vm as i32,
    }
}

pub fn get_traffic_policy_fixture(id: &str) -> TrafficPolicyMessage {
    TrafficPolicyMessage {
        id: id.to_string(),
        rules: vec![
            TrafficRuleMessage {
                description: "allow http".to_owned(),
                protocol: "tcp".to_owned(),
                ports: vec![80, 443],
                action: RuleAction::Accept as i32,
            },
            TrafficRuleMessage {
                description: "drop everything else".to_owned(),
                protocol: "all".to_owned(),
                ports: vec![],
                action: RuleAction::Drop as i32,
            },
        ],
    }
}
