use edgectl_core::{ApplicationMessage, PersistableModel, PortMessage};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LifecycleStatus {
    #[default]
    Stopped,
    Running,
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ApplicationKind {
    #[default]
    Container,
    Vm,
}

impl ApplicationKind {
    pub fn owns_policy(&self) -> bool {
        matches!(self, ApplicationKind::Container)
    }
}

impl fmt::Display for ApplicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationKind::Container => write!(f, "container"),
            ApplicationKind::Vm => write!(f, "vm"),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Port {
    pub port: u32,
    pub protocol: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Application {
    pub id: String,

    pub name: String,
    pub version: String,
    pub vendor: String,
    pub description: String,
    pub image: String,
    pub cores: i32,
    pub memory: i32,
    pub ports: Vec<Port>,

    pub status: LifecycleStatus,
    pub kind: ApplicationKind,
}

impl Application {
    pub fn redeploy_from(&mut self, spec: Application) {
        let Application {
            name,
            version,
            vendor,
            description,
            image,
            cores,
            memory,
            ports,
            ..
        } = spec;

        self.name = name;
        self.version = version;
        self.vendor = vendor;
        self.description = description;
        self.image = image;
        self.cores = cores;
        self.memory = memory;
        self.ports = ports;
    }
}

impl PersistableModel for Application {
    fn get_id(&self) -> String {
        self.id.clone()
    }
}

impl From<ApplicationMessage> for Application {
    fn from(message: ApplicationMessage) -> Self {
        let status = match edgectl_core::LifecycleStatus::try_from(message.status) {
            Ok(edgectl_core::LifecycleStatus::Running) => LifecycleStatus::Running,
            _ => LifecycleStatus::Stopped,
        };

        let kind = match edgectl_core::ApplicationKind::try_from(message.kind) {
            Ok(edgectl_core::ApplicationKind::Vm) => ApplicationKind::Vm,
            _ => ApplicationKind::Container,
        };

        Self {
            id: message.id,
            name: message.name,
            version: message.version,
            vendor: message.vendor,
            description: message.description,
            image: message.image,
            cores: message.cores,
            memory: message.memory,
            ports: message
                .ports
                .into_iter()
                .map(|port| Port {
                    port: port.port,
                    protocol: port.protocol,
                })
                .collect(),
            status,
            kind,
        }
    }
}

impl From<Application> for ApplicationMessage {
    fn from(application: Application) -> Self {
        let status = match application.status {
            LifecycleStatus::Stopped => edgectl_core::LifecycleStatus::Stopped,
            LifecycleStatus::Running => edgectl_core::LifecycleStatus::Running,
        };

        let kind = match application.kind {
            ApplicationKind::Container => edgectl_core::ApplicationKind::Container,
            ApplicationKind::Vm => edgectl_core::ApplicationKind::Vm,
        };

        Self {
            id: application.id,
            name: application.name,
            version: application.version,
            vendor: application.vendor,
            description: application.description,
            image: application.image,
            cores: application.cores,
            memory: application.memory,
            ports: application
                .ports
                .into_iter()
                .map(|port| PortMessage {
                    port: port.port,
                    protocol: port.protocol,
                })
                .collect(),
            status: status as i32,
            kind: kind as i32,
        }
    }
}
