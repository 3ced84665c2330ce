pub mod create_event;
pub mod dispatcher;
pub mod list_events;
pub mod mcp_router;
pub mod registry;
pub mod today;
