//! Role-based request gating: the route guard middleware in front of every
//! handler, and the role guard called from inside handlers.

pub mod middleware;
pub mod role;
pub mod routes;

pub use middleware::{RouteGuard, route_guard};
pub use role::require_role;
pub use routes::{GuardDecision, RouteTable};
