use edgectl_core::{PersistableModel, TrafficPolicyMessage, TrafficRuleMessage};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RuleAction {
    #[default]
    Accept,
    Drop,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrafficRule {
    pub description: String,
    pub protocol: String,
    pub ports: Vec<u32>,
    pub action: RuleAction,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Policy {
    pub id: String,
    pub rules: Vec<TrafficRule>,
}

impl Policy {
    pub fn default_for(application_id: &str) -> Self {
        Self {
            id: application_id.to_string(),
            rules: vec![TrafficRule {
                description: "default".to_owned(),
                protocol: "all".to_owned(),
                ports: vec![],
                action: RuleAction::Accept,
            }],
        }
    }
}

impl PersistableModel for Policy {
    fn get_id(&self) -> String {
        self.id.clone()
    }
}

impl From<TrafficPolicyMessage> for Policy {
    fn from(message: TrafficPolicyMessage) -> Self {
        let rules = message
            .rules
            .into_iter()
            .map(|rule| TrafficRule {
                action: match edgectl_core::RuleAction::try_from(rule.action) {
                    Ok(edgectl_core::RuleAction::Drop) => RuleAction::Drop,
                    _ => RuleAction::Accept,
                },
                description: rule.description,
                protocol: rule.protocol,
                ports: rule.ports,
            })
            .collect();

        Self {
            id: message.id,
            rules,
        }
    }
}

impl From<Policy> for TrafficPolicyMessage {
    fn from(policy: Policy) -> Self {
        let rules = policy
            .rules
            .into_iter()
            .map(|rule| {
                let action = match rule.action {
                    RuleAction::Accept => edgectl_core::RuleAction::Accept,
                    RuleAction::Drop => edgectl_core::RuleAction::Drop,
                };

                TrafficRuleMessage {
                    description: rule.description,
                    protocol: rule.protocol,
                    ports: rule.ports,
                    action: action as i32,
                }
            })
            .collect();

        Self {
            id: policy.id,
            rules,
        }
    }
}
