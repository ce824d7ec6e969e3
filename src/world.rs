//! 世界记录：兴趣点、道路、区域与世界，以及 GeoJSON 导出

use crate::catalog::read_json;
use crate::enums::{AreaType, PoiType, SpawnType, StreetType};
use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// 世界文件格式版本
pub const FORMAT_VERSION: u32 = 1;

/// 坐标 (x, y)
pub type Coord = (f64, f64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    #[serde(rename = "type")]
    pub kind: PoiType,
    pub point: Coord,
    pub spawns: Vec<SpawnType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Street {
    #[serde(rename = "type")]
    pub kind: StreetType,
    pub points: Vec<Coord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    #[serde(rename = "type")]
    pub kind: AreaType,
    pub points: Vec<Coord>,
    pub spawns: Vec<SpawnType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    /// (min_x, min_y, max_x, max_y)
    pub bbox: [f64; 4],
    /// Unix 秒
    #[serde(default = "now_timestamp")]
    pub timestamp: i64,
    #[serde(default = "format_version")]
    pub version: u32,
    #[serde(default)]
    pub points: Vec<PointOfInterest>,
    #[serde(default)]
    pub streets: Vec<Street>,
    #[serde(default)]
    pub areas: Vec<Area>,
}

fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

fn format_version() -> u32 {
    FORMAT_VERSION
}

impl World {
    /// 新建空世界，随机 UUID，时间戳为当前时间
    pub fn new(bbox: [f64; 4]) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            bbox,
            timestamp: now_timestamp(),
            version: FORMAT_VERSION,
            points: Vec::new(),
            streets: Vec::new(),
            areas: Vec::new(),
        }
    }

    /// 使用给定 UUID 新建世界
    pub fn with_uuid(bbox: [f64; 4], uuid: &str) -> Result<Self> {
        let uuid = Uuid::parse_str(uuid).map_err(|_| ConvertError::InvalidUuid(uuid.to_string()))?;
        Ok(Self {
            uuid,
            ..Self::new(bbox)
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(ConvertError::Encode)?;
        fs::write(path, content).map_err(|e| ConvertError::io(path, e))
    }

    /// 导出为 GeoJSON FeatureCollection
    pub fn to_geojson(&self) -> JsonValue {
        let points = self.points.iter().map(|p| {
            feature(
                json!({ "type": "Point", "coordinates": coord(p.point) }),
                json!({ "kind": "poi", "type": p.kind, "spawns": p.spawns }),
            )
        });
        let streets = self.streets.iter().map(|s| {
            feature(
                json!({ "type": "LineString", "coordinates": coords(&s.points) }),
                json!({ "kind": "street", "type": s.kind }),
            )
        });
        let areas = self.areas.iter().map(|a| {
            feature(
                json!({ "type": "Polygon", "coordinates": [coords(&closed_ring(&a.points))] }),
                json!({ "kind": "area", "type": a.kind, "spawns": a.spawns }),
            )
        });

        json!({
            "type": "FeatureCollection",
            "bbox": self.bbox,
            "uuid": self.uuid,
            "timestamp": self.timestamp,
            "version": self.version,
            "features": points.chain(streets).chain(areas).collect::<Vec<_>>(),
        })
    }
}

fn feature(geometry: JsonValue, properties: JsonValue) -> JsonValue {
    json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": properties,
    })
}

fn coord((x, y): Coord) -> JsonValue {
    json!([x, y])
}

fn coords(points: &[Coord]) -> JsonValue {
    JsonValue::Array(points.iter().copied().map(coord).collect())
}

/// 多边形外环首尾闭合
fn closed_ring(points: &[Coord]) -> Vec<Coord> {
    let mut ring = points.to_vec();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if points.len() > 1 && first != last {
            ring.push(*first);
        }
    }
    ring
}
