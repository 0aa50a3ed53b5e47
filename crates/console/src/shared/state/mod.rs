pub mod resource_list;

pub use resource_list::{RefreshHook, ResourceList};
