/// Liveness check. Answers as long as the process serves requests.
#[tracing::instrument(name = "http::health::get")]
pub async fn health() -> &'static str {
    "ok"
}
