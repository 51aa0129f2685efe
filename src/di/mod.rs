pub mod container;

pub use container::{create_application, ServiceContainer};
