use edgectl_core::{
    ApplicationId, ApplicationMessage, ApplicationTrait, Empty, LifecycleCommand,
    ListApplicationsResponse,
};
use std::{sync::Arc, time::Duration};
use tonic::{Request, Response, Status};

use crate::context::OperationContext;
use crate::models::Application;
use crate::services::ApplicationService;

#[derive(Debug)]
pub struct GrpcApplicationService {
    service: Arc<ApplicationService>,
    request_timeout: Duration,
}

impl GrpcApplicationService {
    pub fn new(service: Arc<ApplicationService>, request_timeout: Duration) -> Self {
        GrpcApplicationService {
            service,
            request_timeout,
        }
    }

    fn context(&self) -> OperationContext {
        OperationContext::with_timeout(self.request_timeout)
    }
}

#[tonic::async_trait]
impl ApplicationTrait for GrpcApplicationService {
    #[tracing::instrument(name = "grpc::application::deploy_container")]
    async fn deploy_container(
        &self,
        request: Request<ApplicationMessage>,
    ) -> Result<Response<ApplicationId>, Status> {
        let spec: Application = request.into_inner().into();

        let application_id = self
            .service
            .deploy_container(&self.context(), spec)
            .await?;

        Ok(Response::new(ApplicationId::new(&application_id)))
    }

    #[tracing::instrument(name = "grpc::application::deploy_vm")]
    async fn deploy_vm(
        &self,
        request: Request<ApplicationMessage>,
    ) -> Result<Response<ApplicationId>, Status> {
        let spec: Application = request.into_inner().into();

        let application_id = self.service.deploy_vm(&self.context(), spec).await?;

        Ok(Response::new(ApplicationId::new(&application_id)))
    }

    #[tracing::instrument(name = "grpc::application::get_all")]
    async fn get_all(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<ListApplicationsResponse>, Status> {
        let applications = self.service.list(&self.context()).await?;

        let application_messages = applications
            .into_iter()
            .map(|application| application.into())
            .collect();

        let response = ListApplicationsResponse {
            applications: application_messages,
        };

        Ok(Response::new(response))
    }

    #[tracing::instrument(name = "grpc::application::get")]
    async fn get(
        &self,
        request: Request<ApplicationId>,
    ) -> Result<Response<ApplicationMessage>, Status> {
        let application_id = request.into_inner().id;

        let application = self
            .service
            .get_by_id(&self.context(), &application_id)
            .await?;

        Ok(Response::new(application.into()))
    }

    #[tracing::instrument(name = "grpc::application::redeploy")]
    async fn redeploy(
        &self,
        request: Request<ApplicationMessage>,
    ) -> Result<Response<Empty>, Status> {
        let spec: Application = request.into_inner().into();
        let application_id = spec.id.clone();

        self.service
            .redeploy(&self.context(), &application_id, spec)
            .await?;

        Ok(Response::new(Empty {}))
    }

    #[tracing::instrument(name = "grpc::application::remove")]
    async fn remove(&self, request: Request<ApplicationId>) -> Result<Response<Empty>, Status> {
        let application_id = request.into_inner().id;

        match self.service.remove(&self.context(), &application_id).await {
            Ok(()) => Ok(Response::new(Empty {})),
            Err(err) => {
                tracing::error!("remove application {} failed: {}", application_id, err);
                Err(err.into())
            }
        }
    }

    #[tracing::instrument(name = "grpc::application::start")]
    async fn start(&self, request: Request<LifecycleCommand>) -> Result<Response<Empty>, Status> {
        let application_id = request.into_inner().id;

        self.service.start(&self.context(), &application_id).await?;

        Ok(Response::new(Empty {}))
    }

    #[tracing::instrument(name = "grpc::application::stop")]
    async fn stop(&self, request: Request<LifecycleCommand>) -> Result<Response<Empty>, Status> {
        let application_id = request.into_inner().id;

        self.service.stop(&self.context(), &application_id).await?;

        Ok(Response::new(Empty {}))
    }

    #[tracing::instrument(name = "grpc::application::restart")]
    async fn restart(&self, request: Request<LifecycleCommand>) -> Result<Response<Empty>, Status> {
        let application_id = request.into_inner().id;

        self.service
            .restart(&self.context(), &application_id)
            .await?;

        Ok(Response::new(Empty {}))
    }
}
