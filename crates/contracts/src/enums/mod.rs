pub mod resource_type;
