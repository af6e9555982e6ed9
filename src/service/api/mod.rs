mod application;
mod health;
mod policy;

pub use application::GrpcApplicationService;
pub use health::GrpcHealthService;
pub use policy::GrpcApplicationPolicyService;
