/// Router Module Index
///
/// Routing is split by access tier so each layer is applied explicitly at
/// the module level.

/// Routes accessible to anonymous clients.
pub mod public;

/// Routes protected by the `AuthUser` extractor middleware.
pub mod authenticated;

/// Routes restricted to the `SuperAdmin` role (checked in the handlers).
pub mod admin;
