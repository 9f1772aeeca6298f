pub mod create_category;
pub mod delete_category;
pub mod get_category;
pub mod list_categories;
pub mod update_category;

pub use create_category::create_category;
pub use delete_category::delete_category;
pub use get_category::get_category;
pub use list_categories::list_categories;
pub use update_category::update_category;
