//! Core domain logic for the personal assistant.
//! Entities, session rehydration, display ordering and request validation.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod ordering;
pub mod rehydrate;
pub mod service;
pub mod session;
pub mod validation;

pub use config::{AssistantConfig, ConfigError, LogConfig, StoreKind};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::Contact;
pub use model::id::{EntityId, IdAllocator};
pub use model::record::{ContactRecord, TodoListRecord, TodoRecord};
pub use model::todo::Todo;
pub use model::todo_list::TodoList;
pub use model::{EntityError, EntityResult};
pub use ordering::{order_contacts, order_todo_lists, order_todos};
pub use rehydrate::{
    rehydrate_contact, rehydrate_todo, rehydrate_todo_list, RecordKind, RehydrateError,
    RehydrateResult,
};
pub use service::assistant_service::AssistantService;
pub use service::workspace::Workspace;
pub use service::{Resource, ServiceError, ServiceResult};
pub use session::{
    new_session_id, MemorySessionStore, SessionId, SessionSnapshot, SessionStore,
    SqliteSessionStore, StoreError, StoreResult,
};
pub use validation::{ValidationError, ValidationLimits};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
