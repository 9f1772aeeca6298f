pub mod create_event;
pub mod delete_event;
pub mod get_event;
pub mod list_events;
pub mod update_event;

pub use create_event::create_event;
pub use delete_event::delete_event;
pub use get_event::get_event;
pub use list_events::list_events;
pub use update_event::update_event;
