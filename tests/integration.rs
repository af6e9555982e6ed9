use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tonic::Request as GrpcRequest;
use tower::ServiceExt;

use edgectl::{
    api::{GrpcApplicationPolicyService, GrpcApplicationService},
    http::http_router,
    state::ControllerState,
};
use edgectl_core::test::{get_container_app_fixture, get_traffic_policy_fixture, get_vm_app_fixture};
use edgectl_core::{ApplicationId, ApplicationPolicyTrait, ApplicationTrait, Empty, LifecycleCommand};

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    if body.is_empty() {
        return (status, Value::Null);
    }

    match serde_json::from_slice::<Value>(&body) {
        Ok(json) => (status, json),
        Err(_) => (status, Value::String(String::from_utf8_lossy(&body).into_owned())),
    }
}

#[tokio::test]
async fn test_e2e() {
    let state = ControllerState::in_memory(Duration::from_secs(5));
    let app = http_router(state.clone());

    let application_service =
        GrpcApplicationService::new(Arc::clone(&state.applications), state.request_timeout);
    let policy_service =
        GrpcApplicationPolicyService::new(Arc::clone(&state.applications), state.request_timeout);

    // deploy a vm and a container workload
    let vm_app_id = application_service
        .deploy_vm(GrpcRequest::new(get_vm_app_fixture(None)))
        .await
        .unwrap()
        .into_inner()
        .id;
    let container_app_id = application_service
        .deploy_container(GrpcRequest::new(get_container_app_fixture(None)))
        .await
        .unwrap()
        .into_inner()
        .id;

    let applications = application_service
        .get_all(GrpcRequest::new(Empty {}))
        .await
        .unwrap()
        .into_inner()
        .applications;
    assert_eq!(applications.len(), 2);

    // alias both workloads and attach the aliases to one dns config
    let (status, body) = send(
        &app,
        Method::POST,
        "/dns_configs",
        Some(json!({
            "name": "edge dns",
            "a_records": [{"name": "gateway", "description": "", "ips": ["10.0.0.1"]}],
            "forwarders": [{"name": "upstream", "description": "", "ip": "1.1.1.1"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let config_id = body["id"].as_str().unwrap().to_owned();

    let (status, body) = send(
        &app,
        Method::POST,
        "/dns_vm_app_aliases",
        Some(json!({"name": "vm", "description": "vm alias", "vm_app_id": vm_app_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let vm_alias_id = body["id"].as_str().unwrap().to_owned();

    let (status, body) = send(
        &app,
        Method::POST,
        "/dns_container_app_aliases",
        Some(json!({
            "name": "web",
            "description": "container alias",
            "container_app_id": container_app_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let container_alias_id = body["id"].as_str().unwrap().to_owned();

    let (status, body) = send(
        &app,
        Method::POST,
        "/dns_configs_dns_vm_app_aliases",
        Some(json!({"dns_config_id": config_id, "dns_vm_app_alias_id": vm_alias_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let vm_link_id = body["id"].as_str().unwrap().to_owned();

    let (status, body) = send(
        &app,
        Method::POST,
        "/dns_configs_dns_container_app_aliases",
        Some(json!({
            "dns_config_id": config_id,
            "dns_container_app_alias_id": container_alias_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let container_link_id = body["id"].as_str().unwrap().to_owned();

    // referenced records cannot go away
    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/dns_vm_app_aliases/{vm_alias_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        Value::String(format!(
            "cannot delete dns_vm_app_alias_id {vm_alias_id}: record in use in dns_configs_dns_vm_app_aliases"
        ))
    );

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/dns_configs/{config_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // lifecycle of the container workload and its policy
    application_service
        .start(GrpcRequest::new(LifecycleCommand::new(&container_app_id)))
        .await
        .unwrap();

    policy_service
        .set(GrpcRequest::new(get_traffic_policy_fixture(&container_app_id)))
        .await
        .unwrap();

    application_service
        .stop(GrpcRequest::new(LifecycleCommand::new(&container_app_id)))
        .await
        .unwrap();

    application_service
        .remove(GrpcRequest::new(ApplicationId::new(&container_app_id)))
        .await
        .unwrap();

    let status = policy_service
        .get(GrpcRequest::new(ApplicationId::new(&container_app_id)))
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::NotFound);

    // unlink and tear down the dns records
    for uri in [
        format!("/dns_configs_dns_vm_app_aliases/{vm_link_id}"),
        format!("/dns_configs_dns_container_app_aliases/{container_link_id}"),
        format!("/dns_vm_app_aliases/{vm_alias_id}"),
        format!("/dns_container_app_aliases/{container_alias_id}"),
        format!("/dns_configs/{config_id}"),
    ] {
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK, "DELETE {uri}");
    }

    let (status, body) = send(&app, Method::GET, "/dns_configs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let applications = application_service
        .get_all(GrpcRequest::new(Empty {}))
        .await
        .unwrap()
        .into_inner()
        .applications;
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].id, vm_app_id);
}
