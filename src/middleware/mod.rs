pub mod auth;
pub mod policy;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use policy::{guard_middleware, RoutePolicy, TenantCheck};
