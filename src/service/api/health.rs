use edgectl_core::{Health, HealthRequest, HealthResponse};
use std::{sync::Arc, time::Duration};
use tonic::{Request, Response, Status};

use crate::context::OperationContext;
use crate::services::ApplicationService;

/// Reports whether application storage answers within the request timeout.
#[derive(Debug)]
pub struct GrpcHealthService {
    service: Arc<ApplicationService>,
    request_timeout: Duration,
}

impl GrpcHealthService {
    pub fn new(service: Arc<ApplicationService>, request_timeout: Duration) -> Self {
        GrpcHealthService {
            service,
            request_timeout,
        }
    }
}

#[tonic::async_trait]
impl Health for GrpcHealthService {
    #[tracing::instrument(name = "grpc::health::health", skip_all)]
    async fn health(
        &self,
        _request: Request<HealthRequest>,
    ) -> Result<Response<HealthResponse>, Status> {
        let context = OperationContext::with_timeout(self.request_timeout);

        let response = match self.service.list(&context).await {
            Ok(applications) => HealthResponse {
                ok: true,
                applications: applications.len() as u32,
            },
            Err(err) => {
                tracing::warn!(operation_id = %context.operation_id, "unhealthy: {}", err);

                HealthResponse {
                    ok: false,
                    applications: 0,
                }
            }
        };

        Ok(Response::new(response))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use edgectl_core::test::get_vm_app_fixture;
    use edgectl_core::{Health, HealthRequest};
    use tonic::Request;

    use super::*;
    use crate::models::{Application, Policy};
    use crate::persistence::{memory::MemoryPersistence, Persistence};

    #[derive(Debug)]
    struct UnreachableApplications;

    #[async_trait]
    impl Persistence<Application> for UnreachableApplications {
        async fn upsert(&self, _model: &Application) -> anyhow::Result<u64> {
            anyhow::bail!("connection refused")
        }

        async fn upsert_many(&self, _models: &[Application]) -> anyhow::Result<u64> {
            anyhow::bail!("connection refused")
        }

        async fn delete(&self, _model_id: &str) -> anyhow::Result<u64> {
            anyhow::bail!("connection refused")
        }

        async fn get_by_id(&self, _model_id: &str) -> anyhow::Result<Option<Application>> {
            anyhow::bail!("connection refused")
        }

        async fn list(&self) -> anyhow::Result<Vec<Application>> {
            anyhow::bail!("connection refused")
        }
    }

    fn health_service(service: ApplicationService) -> GrpcHealthService {
        GrpcHealthService::new(Arc::new(service), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_health_counts_applications() -> anyhow::Result<()> {
        let service = ApplicationService::new(
            Box::<MemoryPersistence<Application>>::default(),
            Box::<MemoryPersistence<Application>>::default(),
            Box::<MemoryPersistence<Policy>>::default(),
        );
        service
            .deploy_vm(&OperationContext::new(), get_vm_app_fixture(None).into())
            .await?;

        let response = health_service(service)
            .health(Request::new(HealthRequest {}))
            .await?
            .into_inner();

        assert!(response.ok);
        assert_eq!(response.applications, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_health_reports_unreachable_storage() -> anyhow::Result<()> {
        let service = ApplicationService::new(
            Box::<MemoryPersistence<Application>>::default(),
            Box::new(UnreachableApplications),
            Box::<MemoryPersistence<Policy>>::default(),
        );

        let response = health_service(service)
            .health(Request::new(HealthRequest {}))
            .await?
            .into_inner();

        assert!(!response.ok);
        assert_eq!(response.applications, 0);

        Ok(())
    }
}
