use edgectl_core::{ApplicationId, ApplicationPolicyTrait, Empty, TrafficPolicyMessage};
use std::{sync::Arc, time::Duration};
use tonic::{Request, Response, Status};

use crate::context::OperationContext;
use crate::services::ApplicationService;

#[derive(Debug)]
pub struct GrpcApplicationPolicyService {
    service: Arc<ApplicationService>,
    request_timeout: Duration,
}

impl GrpcApplicationPolicyService {
    pub fn new(service: Arc<ApplicationService>, request_timeout: Duration) -> Self {
        GrpcApplicationPolicyService {
            service,
            request_timeout,
        }
    }
}

#[tonic::async_trait]
impl ApplicationPolicyTrait for GrpcApplicationPolicyService {
    #[tracing::instrument(name = "grpc::policy::get")]
    async fn get(
        &self,
        request: Request<ApplicationId>,
    ) -> Result<Response<TrafficPolicyMessage>, Status> {
        let context = OperationContext::with_timeout(self.request_timeout);

        let policy = self
            .service
            .get_policy(&context, &request.into_inner().id)
            .await?;

        Ok(Response::new(policy.into()))
    }

    #[tracing::instrument(name = "grpc::policy::set")]
    async fn set(&self, request: Request<TrafficPolicyMessage>) -> Result<Response<Empty>, Status> {
        let context = OperationContext::with_timeout(self.request_timeout);

        self.service
            .set_policy(&context, request.into_inner().into())
            .await?;

        Ok(Response::new(Empty {}))
    }
}
