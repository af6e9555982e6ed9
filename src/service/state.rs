use std::{sync::Arc, time::Duration};

use crate::context::OperationContext;
use crate::models::{
    Application, DnsConfig, DnsConfigDnsContainerAppAlias, DnsConfigDnsVmAppAlias,
    DnsContainerAppAlias, DnsVmAppAlias, Policy,
};
use crate::persistence::memory::MemoryPersistence;
use crate::services::{ApplicationService, AssociationIndex, DeletionGuard, Repository};

/// Every collection and service the controller serves, shared by the REST
/// and gRPC surfaces.
#[derive(Clone, Debug)]
pub struct ControllerState {
    pub dns_configs: Arc<Repository<DnsConfig>>,
    pub dns_vm_app_aliases: Arc<Repository<DnsVmAppAlias>>,
    pub dns_container_app_aliases: Arc<Repository<DnsContainerAppAlias>>,

    pub dns_config_vm_aliases: Arc<AssociationIndex<DnsConfigDnsVmAppAlias>>,
    pub dns_config_container_aliases: Arc<AssociationIndex<DnsConfigDnsContainerAppAlias>>,

    pub applications: Arc<ApplicationService>,

    pub request_timeout: Duration,
}

impl ControllerState {
    /// Wires every collection to in-memory storage. DNS configs are guarded
    /// by both association tables, each alias kind by its own.
    pub fn in_memory(request_timeout: Duration) -> Self {
        let dns_config_vm_aliases = Arc::new(AssociationIndex::new(Arc::new(
            MemoryPersistence::<DnsConfigDnsVmAppAlias>::default(),
        )));
        let dns_config_container_aliases = Arc::new(AssociationIndex::new(Arc::new(
            MemoryPersistence::<DnsConfigDnsContainerAppAlias>::default(),
        )));

        let dns_configs = Repository::new(Arc::new(MemoryPersistence::<DnsConfig>::default()))
            .guarded_by(
                DeletionGuard::new()
                    .with(dns_config_vm_aliases.clone())
                    .with(dns_config_container_aliases.clone()),
            );

        let dns_vm_app_aliases =
            Repository::new(Arc::new(MemoryPersistence::<DnsVmAppAlias>::default()))
                .guarded_by(DeletionGuard::new().with(dns_config_vm_aliases.clone()));

        let dns_container_app_aliases =
            Repository::new(Arc::new(MemoryPersistence::<DnsContainerAppAlias>::default()))
                .guarded_by(DeletionGuard::new().with(dns_config_container_aliases.clone()));

        let applications = ApplicationService::new(
            Box::<MemoryPersistence<Application>>::default(),
            Box::<MemoryPersistence<Application>>::default(),
            Box::<MemoryPersistence<Policy>>::default(),
        );

        Self {
            dns_configs: Arc::new(dns_configs),
            dns_vm_app_aliases: Arc::new(dns_vm_app_aliases),
            dns_container_app_aliases: Arc::new(dns_container_app_aliases),
            dns_config_vm_aliases,
            dns_config_container_aliases,
            applications: Arc::new(applications),
            request_timeout,
        }
    }

    /// A fresh context bounded by the configured request timeout.
    pub fn context(&self) -> OperationContext {
        OperationContext::with_timeout(self.request_timeout)
    }
}
