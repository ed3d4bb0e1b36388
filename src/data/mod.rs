pub mod geoloc_object;
pub mod holiday;
pub mod map_config;
pub mod persistence;

pub use holiday::Holiday;
pub use map_config::{MapConfig, MapConfigBuilder, MapConfigDocument};
pub use persistence::Persistable;
