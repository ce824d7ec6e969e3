//! 刷新条件

use crate::enums::{MoonType, TimeType, WeatherType};
use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};

/// 天气、月相与时段的组合限制，附带概率修正
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub index: u32,
    pub modifier: f64,
    pub weathers: Vec<WeatherType>,
    pub moons: Vec<MoonType>,
    pub times: Vec<TimeType>,
}

impl Condition {
    /// 不限制任何条件
    pub fn any() -> Self {
        Self {
            index: 1,
            modifier: 1.0,
            weathers: WeatherType::ALL.to_vec(),
            moons: MoonType::ALL.to_vec(),
            times: TimeType::ALL.to_vec(),
        }
    }

    /// 构造条件；空列表视为不限制
    pub fn new(
        index: u32,
        modifier: f64,
        weathers: Vec<WeatherType>,
        moons: Vec<MoonType>,
        times: Vec<TimeType>,
    ) -> Result<Self> {
        if index == 0 {
            return Err(ConvertError::InvalidRelation(
                "条件序号必须从 1 开始".to_string(),
            ));
        }
        if !modifier.is_finite() || modifier < 0.0 {
            return Err(ConvertError::InvalidRelation(format!(
                "条件修正值无效: {}",
                modifier
            )));
        }

        let any = Self::any();
        Ok(Self {
            index,
            modifier,
            weathers: if weathers.is_empty() { any.weathers } else { weathers },
            moons: if moons.is_empty() { any.moons } else { moons },
            times: if times.is_empty() { any.times } else { times },
        })
    }
}
