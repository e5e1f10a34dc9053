//! Инфраструктурный слой вокруг движка:
//! - генерация ID игр;
//! - RNG-реализации для движка;
//! - хранилище введённых ростеров (off-engine, для презентации);
//! - маппинги между engine и API DTO.

pub mod ids;
pub mod mapping;
pub mod persistence;
pub mod rng;
pub mod rng_seed;

pub use ids::*;
pub use mapping::*;
pub use persistence::*;
pub use rng::*;
pub use rng_seed::RngSeed;
