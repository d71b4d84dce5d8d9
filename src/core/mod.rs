//! Process runtime: HTTP surface and shutdown orchestration

pub mod http;
pub mod shutdown;

pub use http::{create_router, serve, AppState};
pub use shutdown::{
    guard_startup, ShutdownCoordinator, ShutdownPhase, ShutdownReport, ShutdownTrigger,
    EXIT_FAILURE, EXIT_SUCCESS,
};
