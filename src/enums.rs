//! 整数枚举定义
//!
//! 所有枚举从 1 开始编号，序列化为整数，可从整数或名称（不区分大小写）解析。

use crate::error::ConvertError;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident = $value:literal => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum $name {
            $($variant = $value),+
        }

        impl $name {
            /// 按声明顺序排列的全部取值
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn value(self) -> u8 {
                self as u8
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            pub fn from_value(value: u8) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl FromStr for $name {
            type Err = ConvertError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let found = match s.parse::<u8>() {
                    Ok(v) => Self::from_value(v),
                    Err(_) => Self::ALL
                        .iter()
                        .copied()
                        .find(|v| v.name().eq_ignore_ascii_case(s)),
                };
                found.ok_or_else(|| ConvertError::InvalidEnum {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.name())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.value())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct EnumVisitor;

                impl<'de> Visitor<'de> for EnumVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, "{} 的整数值或名称", $kind)
                    }

                    fn visit_u64<E: de::Error>(self, v: u64) -> Result<$name, E> {
                        u8::try_from(v)
                            .ok()
                            .and_then($name::from_value)
                            .ok_or_else(|| E::custom(format!("无效的 {} 值: {}", $kind, v)))
                    }

                    fn visit_i64<E: de::Error>(self, v: i64) -> Result<$name, E> {
                        u8::try_from(v)
                            .ok()
                            .and_then($name::from_value)
                            .ok_or_else(|| E::custom(format!("无效的 {} 值: {}", $kind, v)))
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<$name, E> {
                        v.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_any(EnumVisitor)
            }
        }
    };
}

int_enum! {
    /// 天气
    WeatherType, "WeatherType" {
        Clear = 1 => "CLEAR",
        PartyCloudy = 2 => "PARTY_CLOUDY",
        Cloudy = 3 => "CLOUDY",
        Windy = 4 => "WINDY",
        Foggy = 5 => "FOGGY",
        Rainy = 6 => "RAINY",
        Snowy = 7 => "SNOWY",
        Sandstorm = 8 => "SANDSTORM",
        Thunderstorm = 9 => "THUNDERSTORM",
        VolcanicEruption = 10 => "VOLCANIC_ERUPTION",
        ExtremeWarning = 11 => "EXTREME_WARNING",
    }
}

int_enum! {
    /// 月相
    MoonType, "MoonType" {
        Full = 1 => "FULL",
        Decreasing = 2 => "DECREASING",
        New = 3 => "NEW",
        Increasing = 4 => "INCREASING",
        LunarEclipse = 5 => "LUNAR_ECLIPSE",
        SunEclipse = 6 => "SUN_ECLIPSE",
        Bloody = 7 => "BLOODY",
    }
}

int_enum! {
    /// 时段
    TimeType, "TimeType" {
        Morning = 1 => "MORNING",
        Noon = 2 => "NOON",
        Evening = 3 => "EVENING",
        Night = 4 => "NIGHT",
    }
}

int_enum! {
    /// 刷新区域类型
    SpawnType, "SpawnType" {
        Ancient = 1 => "ANCIENT",
        Arctic = 2 => "ARCTIC",
        Beach = 3 => "BEACH",
        Cave = 4 => "CAVE",
        Cemetery = 5 => "CEMETERY",
        Commercial = 6 => "COMMERCIAL",
        ConstructionSite = 7 => "CONSTRUCTION_SITE",
        CoralReef = 8 => "CORAL_REEF",
        Desert = 9 => "DESERT",
        Dock = 10 => "DOCK",
        Farmland = 11 => "FARMLAND",
        Forest = 12 => "FOREST",
        Garbage = 13 => "GARBAGE",
        Glacier = 14 => "GLACIER",
        Grass = 15 => "GRASS",
        Heath = 16 => "HEATH",
        Hills = 17 => "HILLS",
        Industrial = 18 => "INDUSTRIAL",
        Lake = 19 => "LAKE",
        Library = 20 => "LIBRARY",
        Medical = 21 => "MEDICAL",
        Military = 22 => "MILITARY",
        Meadow = 23 => "MEADOW",
        Mountain = 24 => "MOUNTAIN",
        MountainTop = 25 => "MOUNTAIN_TOP",
        NatureReserve = 26 => "NATURE_RESERVE",
        Ocean = 27 => "OCEAN",
        Park = 28 => "PARK",
        Playa = 29 => "PLAYA",
        Playground = 30 => "PLAYGROUND",
        Power = 31 => "POWER",
        Quarry = 32 => "QUARRY",
        Residential = 33 => "RESIDENTIAL",
        River = 34 => "RIVER",
        Savanna = 35 => "SAVANNA",
        Sports = 36 => "SPORTS",
        Urban = 37 => "URBAN",
        Vulcan = 38 => "VULCAN",
        Wetland = 39 => "WETLAND",
        Wood = 40 => "WOOD",
    }
}

int_enum! {
    /// 兴趣点类型
    PoiType, "POIType" {
        None = 1 => "NONE",
        PokeCenter = 2 => "POKE_CENTER",
        Professor = 3 => "PROFESSOR",
        Archaeologist = 4 => "ARCHAEOLOGIST",
        AttackTutor = 5 => "ATTACK_TUTOR",
        Breeding = 6 => "BREEDING",
        Safari = 7 => "SAFARI",
        Dojo = 8 => "DOJO",
        Smith = 9 => "SMITH",
        Stadium = 10 => "STADIUM",
        Theatre = 11 => "THEATRE",
        Shop = 12 => "SHOP",
        ShopBalls = 13 => "SHOP_BALLS",
        ShopBuilding = 14 => "SHOP_BUILDING",
        ShopBoosts = 15 => "SHOP_BOOSTS",
        ShopFood = 16 => "SHOP_FOOD",
        ShopFurniture = 17 => "SHOP_FURNITURE",
        ShopHeals = 18 => "SHOP_HEALS",
        ShopLetters = 19 => "SHOP_LETTERS",
        ShopTm = 20 => "SHOP_TM",
        ShopTools = 21 => "SHOP_TOOLS",
        ArenaNormal = 22 => "ARENA_NORMAL",
        ArenaFire = 23 => "ARENA_FIRE",
        ArenaWater = 24 => "ARENA_WATER",
        ArenaGrass = 25 => "ARENA_GRASS",
        ArenaElectric = 26 => "ARENA_ELECTRIC",
        ArenaIce = 27 => "ARENA_ICE",
        ArenaFighting = 28 => "ARENA_FIGHTING",
        ArenaPoison = 29 => "ARENA_POISON",
        ArenaGround = 30 => "ARENA_GROUND",
        ArenaFlying = 31 => "ARENA_FLYING",
        ArenaPsychic = 32 => "ARENA_PSYCHIC",
        ArenaBug = 33 => "ARENA_BUG",
        ArenaRock = 34 => "ARENA_ROCK",
        ArenaGhost = 35 => "ARENA_GHOST",
        ArenaDark = 36 => "ARENA_DARK",
        ArenaDragon = 37 => "ARENA_DRAGON",
        ArenaSteel = 38 => "ARENA_STEEL",
        ArenaFairy = 39 => "ARENA_FAIRY",
    }
}

int_enum! {
    /// 道路类型
    StreetType, "StreetType" {
        Highway = 1 => "HIGHWAY",
        Street = 2 => "STREET",
        Path = 3 => "PATH",
        Rails = 4 => "RAILS",
        Water = 5 => "WATER",
    }
}

int_enum! {
    /// 区域类型
    AreaType, "AreaType" {
        Undefined = 1 => "UNDEFINED",
        Sand = 2 => "SAND",
        Stone = 3 => "STONE",
        Water = 4 => "WATER",
        Ice = 5 => "ICE",
        Forest = 6 => "FOREST",
        Farmland = 7 => "FARMLAND",
        Meadow = 8 => "MEADOW",
        Urban = 9 => "URBAN",
        Vulcan = 10 => "VULCAN",
        Military = 11 => "MILITARY",
    }
}
