//! Pixelmon 刷新数据转换工具
//!
//! 将逐物种的属性文件与刷新集文件合并为一份刷新概率 JSON

pub mod catalog;
pub mod condition;
pub mod config;
pub mod convert;
pub mod enums;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod normalize;
pub mod relations;
pub mod world;

pub use catalog::{title_case, Catalog, SpeciesStats, UnmatchedSpecies};
pub use condition::Condition;
pub use config::Config;
pub use convert::{convert_all, run, ConversionResult};
pub use enums::{AreaType, MoonType, PoiType, SpawnType, StreetType, TimeType, WeatherType};
pub use error::ConvertError;
pub use mapping::Tables;
pub use normalize::{HeldItem, NormalizedSpawnEntry, Normalizer, RawSpawnEntry};
pub use relations::{RelationTable, SpawnRelation};
pub use world::World;
