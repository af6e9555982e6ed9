use tokio::sync::RwLock;

use crate::{
    context::OperationContext,
    error::{ControllerError, ControllerResult},
    models::{Application, ApplicationKind, LifecycleStatus, Policy},
    persistence::Persistence,
};

const KIND: &str = "application";

/// All mutations serialize on one gate, so a status precondition and the
/// transition it guards are never split by another writer.
#[derive(Debug)]
pub struct ApplicationService {
    pub container_apps: Box<dyn Persistence<Application>>,
    pub vm_apps: Box<dyn Persistence<Application>>,
    pub policies: Box<dyn Persistence<Policy>>,

    gate: RwLock<()>,
}

impl ApplicationService {
    pub fn new(
        container_apps: Box<dyn Persistence<Application>>,
        vm_apps: Box<dyn Persistence<Application>>,
        policies: Box<dyn Persistence<Policy>>,
    ) -> Self {
        Self {
            container_apps,
            vm_apps,
            policies,
            gate: RwLock::new(()),
        }
    }

    fn store(&self, kind: ApplicationKind) -> &dyn Persistence<Application> {
        match kind {
            ApplicationKind::Container => self.container_apps.as_ref(),
            ApplicationKind::Vm => self.vm_apps.as_ref(),
        }
    }

    /// Finds an application and the set it lives in. Callers hold the gate.
    async fn locate(
        &self,
        context: &OperationContext,
        operation: &str,
        application_id: &str,
    ) -> ControllerResult<Option<Application>> {
        for kind in [ApplicationKind::Container, ApplicationKind::Vm] {
            let application = context
                .bounded(operation, self.store(kind).get_by_id(application_id))
                .await??;

            if let Some(mut application) = application {
                application.kind = kind;
                return Ok(Some(application));
            }
        }

        Ok(None)
    }

    async fn locate_existing(
        &self,
        context: &OperationContext,
        operation: &str,
        application_id: &str,
    ) -> ControllerResult<Application> {
        match self.locate(context, operation, application_id).await? {
            Some(application) => Ok(application),
            None => Err(ControllerError::not_found(KIND, application_id)),
        }
    }

    #[tracing::instrument(name = "service::application::deploy", skip(self, context, spec))]
    pub async fn deploy(
        &self,
        context: &OperationContext,
        kind: ApplicationKind,
        spec: Application,
    ) -> ControllerResult<String> {
        const OPERATION: &str = "service::application::deploy";

        let application = Application {
            id: edgectl_core::uuid::new(),
            status: LifecycleStatus::Stopped,
            kind,
            ..spec
        };

        let _gate = context.bounded(OPERATION, self.gate.write()).await?;

        context.ensure_live(OPERATION)?;
        context
            .bounded(OPERATION, self.store(kind).upsert(&application))
            .await??;

        if kind.owns_policy() {
            let policy = Policy::default_for(&application.id);
            let stored = context
                .bounded(OPERATION, self.policies.upsert(&policy))
                .await
                .and_then(|result| result.map_err(ControllerError::from));

            if let Err(err) = stored {
                // an application may not outlive a failed policy write
                self.store(kind).delete(&application.id).await?;
                return Err(err);
            }
        }

        tracing::info!(
            operation_id = %context.operation_id,
            "deployed {} application {}",
            kind,
            application.id
        );

        Ok(application.id)
    }

    pub async fn deploy_container(
        &self,
        context: &OperationContext,
        spec: Application,
    ) -> ControllerResult<String> {
        self.deploy(context, ApplicationKind::Container, spec).await
    }

    pub async fn deploy_vm(
        &self,
        context: &OperationContext,
        spec: Application,
    ) -> ControllerResult<String> {
        self.deploy(context, ApplicationKind::Vm, spec).await
    }

    #[tracing::instrument(name = "service::application::get_by_id", skip(self, context))]
    pub async fn get_by_id(
        &self,
        context: &OperationContext,
        application_id: &str,
    ) -> ControllerResult<Application> {
        const OPERATION: &str = "service::application::get_by_id";

        let _gate = context.bounded(OPERATION, self.gate.read()).await?;

        self.locate_existing(context, OPERATION, application_id)
            .await
    }

    #[tracing::instrument(name = "service::application::list", skip(self, context))]
    pub async fn list(&self, context: &OperationContext) -> ControllerResult<Vec<Application>> {
        const OPERATION: &str = "service::application::list";

        let _gate = context.bounded(OPERATION, self.gate.read()).await?;

        let mut applications = Vec::new();
        for kind in [ApplicationKind::Container, ApplicationKind::Vm] {
            let stored = context
                .bounded(OPERATION, self.store(kind).list())
                .await??;

            applications.extend(stored.into_iter().map(|mut application| {
                application.kind = kind;
                application
            }));
        }

        Ok(applications)
    }

    #[tracing::instrument(name = "service::application::redeploy", skip(self, context, spec))]
    pub async fn redeploy(
        &self,
        context: &OperationContext,
        application_id: &str,
        spec: Application,
    ) -> ControllerResult<()> {
        const OPERATION: &str = "service::application::redeploy";

        let _gate = context.bounded(OPERATION, self.gate.write()).await?;

        let mut application = self
            .locate_existing(context, OPERATION, application_id)
            .await?;
        application.redeploy_from(spec);

        context.ensure_live(OPERATION)?;
        context
            .bounded(OPERATION, self.store(application.kind).upsert(&application))
            .await??;

        tracing::info!(
            operation_id = %context.operation_id,
            "redeployed application {}",
            application_id
        );

        Ok(())
    }

    async fn transition(
        &self,
        context: &OperationContext,
        operation: &str,
        application_id: &str,
        required: LifecycleStatus,
        next: Option<LifecycleStatus>,
    ) -> ControllerResult<Application> {
        let _gate = context.bounded(operation, self.gate.write()).await?;

        let mut application = self
            .locate_existing(context, operation, application_id)
            .await?;

        if application.status != required {
            let state = match required {
                LifecycleStatus::Stopped => "stopped",
                LifecycleStatus::Running => "running",
            };

            return Err(ControllerError::PreconditionFailed(format!(
                "{KIND} {application_id} not {state}"
            )));
        }

        if let Some(next) = next {
            application.status = next;

            context.ensure_live(operation)?;
            context
                .bounded(operation, self.store(application.kind).upsert(&application))
                .await??;
        }

        Ok(application)
    }

    #[tracing::instrument(name = "service::application::start", skip(self, context))]
    pub async fn start(&self, context: &OperationContext, application_id: &str) -> ControllerResult<()> {
        self.transition(
            context,
            "service::application::start",
            application_id,
            LifecycleStatus::Stopped,
            Some(LifecycleStatus::Running),
        )
        .await?;

        tracing::info!(
            operation_id = %context.operation_id,
            "started application {}",
            application_id
        );

        Ok(())
    }

    #[tracing::instrument(name = "service::application::stop", skip(self, context))]
    pub async fn stop(&self, context: &OperationContext, application_id: &str) -> ControllerResult<()> {
        self.transition(
            context,
            "service::application::stop",
            application_id,
            LifecycleStatus::Running,
            Some(LifecycleStatus::Stopped),
        )
        .await?;

        tracing::info!(
            operation_id = %context.operation_id,
            "stopped application {}",
            application_id
        );

        Ok(())
    }

    /// Only checks that the application is running; nothing is stored.
    #[tracing::instrument(name = "service::application::restart", skip(self, context))]
    pub async fn restart(&self, context: &OperationContext, application_id: &str) -> ControllerResult<()> {
        let application = self
            .transition(
                context,
                "service::application::restart",
                application_id,
                LifecycleStatus::Running,
                None,
            )
            .await?;

        tracing::info!(
            operation_id = %context.operation_id,
            "restarted {} application {}",
            application.kind,
            application_id
        );

        Ok(())
    }

    #[tracing::instrument(name = "service::application::remove", skip(self, context))]
    pub async fn remove(&self, context: &OperationContext, application_id: &str) -> ControllerResult<()> {
        const OPERATION: &str = "service::application::remove";

        let _gate = context.bounded(OPERATION, self.gate.write()).await?;

        let policy = context
            .bounded(OPERATION, self.policies.get_by_id(application_id))
            .await??;

        let application = match self.locate(context, OPERATION, application_id).await? {
            Some(application) => application,
            None => {
                if policy.is_some() {
                    tracing::error!(
                        operation_id = %context.operation_id,
                        "policy {} has no application",
                        application_id
                    );

                    return Err(ControllerError::ConsistencyFault(format!(
                        "{KIND} {application_id} not found but had a policy"
                    )));
                }

                return Err(ControllerError::not_found(KIND, application_id));
            }
        };

        if application.kind.owns_policy() && policy.is_none() {
            tracing::error!(
                operation_id = %context.operation_id,
                "container application {} has no policy",
                application_id
            );

            return Err(ControllerError::ConsistencyFault(format!(
                "{KIND} {application_id} has no policy"
            )));
        }

        // last point the deadline may abort; both deletes run to completion
        context.ensure_live(OPERATION)?;
        self.store(application.kind).delete(application_id).await?;

        if policy.is_some() {
            if let Err(err) = self.policies.delete(application_id).await {
                // a policy may not outlive its application
                self.store(application.kind).upsert(&application).await?;
                return Err(err.into());
            }
        }

        tracing::info!(
            operation_id = %context.operation_id,
            "removed {} application {}",
            application.kind,
            application_id
        );

        Ok(())
    }

    #[tracing::instrument(name = "service::application::get_policy", skip(self, context))]
    pub async fn get_policy(
        &self,
        context: &OperationContext,
        application_id: &str,
    ) -> ControllerResult<Policy> {
        const OPERATION: &str = "service::application::get_policy";

        let _gate = context.bounded(OPERATION, self.gate.read()).await?;

        match context
            .bounded(OPERATION, self.policies.get_by_id(application_id))
            .await??
        {
            Some(policy) => Ok(policy),
            None => Err(ControllerError::not_found("policy", application_id)),
        }
    }

    #[tracing::instrument(name = "service::application::set_policy", skip(self, context, policy))]
    pub async fn set_policy(&self, context: &OperationContext, policy: Policy) -> ControllerResult<()> {
        const OPERATION: &str = "service::application::set_policy";

        let _gate = context.bounded(OPERATION, self.gate.write()).await?;

        let application = self.locate_existing(context, OPERATION, &policy.id).await?;

        if !application.kind.owns_policy() {
            return Err(ControllerError::PreconditionFailed(format!(
                "{} application {} does not own a policy",
                application.kind, application.id
            )));
        }

        context.ensure_live(OPERATION)?;
        context
            .bounded(OPERATION, self.policies.upsert(&policy))
            .await??;

        tracing::info!(
            operation_id = %context.operation_id,
            "updated policy of application {}",
            policy.id
        );

        Ok(())
    }
}
