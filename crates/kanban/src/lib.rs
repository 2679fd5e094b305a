//! Kanban board composition: owns the board state and wires drag
//! gestures to the remote status sync.

pub mod notification;
pub mod service;

pub use notification::{
    MemorySink, Notification, NotificationLevel, NotificationService, NotificationSink,
};
pub use service::KanbanService;
