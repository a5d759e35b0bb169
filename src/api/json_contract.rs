use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{BarChartConfig, LineChartConfig};

pub const CHART_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Configuration of either chart kind, tagged by `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartKindConfig {
    Line(LineChartConfig),
    Bar(BarChartConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ChartKindConfig,
}

impl ChartKindConfig {
    pub fn validate(self) -> ChartResult<Self> {
        match self {
            Self::Line(config) => config.validate().map(Self::Line),
            Self::Bar(config) => config.validate().map(Self::Bar),
        }
    }

    pub fn to_json_contract_v1_pretty(self) -> ChartResult<String> {
        let payload = ChartConfigJsonContractV1 {
            schema_version: CHART_CONFIG_JSON_SCHEMA_V1,
            config: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Parses either a bare tagged config or a versioned v1 contract.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(config) = serde_json::from_str::<ChartKindConfig>(input) {
            return config.validate();
        }
        let payload: ChartConfigJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse config json payload: {e}"))
        })?;
        if payload.schema_version != CHART_CONFIG_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidConfig(format!(
                "unsupported config schema version: {}",
                payload.schema_version
            )));
        }
        payload.config.validate()
    }
}
