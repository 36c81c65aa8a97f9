/// Router Module Index
///
/// Organizes the application's routing into access-tier modules. The modules
/// only *register* routes; the permission requirement attached to each route
/// lives in the `ROUTE_PERMISSIONS` table (`crate::permissions`) and is
/// enforced by a single route-layer gate, so the tier split here is purely
/// organizational.

/// Routes reachable without credentials: liveness endpoints and the
/// anonymous-only registration endpoint.
pub mod public;

/// Routes requiring a resolved identity, regardless of role.
pub mod authenticated;

/// Routes restricted to the `ADMIN` and `MAIN_ADMIN` role tiers.
pub mod admin;
