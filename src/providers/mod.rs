// Provider exports
pub mod entities;
pub mod geolocation;

pub use entities::{
    EntityProvider, RandomizedTierProvider, StaticEntityProvider, TieredEntityProvider,
};
pub use geolocation::{GeolocationFeed, ScriptedGeoFeed};
