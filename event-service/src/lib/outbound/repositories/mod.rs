pub mod category;
pub mod event;

pub use category::PostgresCategoryRepository;
pub use event::PostgresEventRepository;
