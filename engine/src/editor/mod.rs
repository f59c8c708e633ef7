pub mod editor_service;
pub mod handlers;

pub use editor_service::EditorService;
