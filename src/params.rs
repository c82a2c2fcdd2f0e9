use crate::{
    qos::QosProfile,
    runtime::{Node, ParameterValue, ParamsMap},
    types::HistoryPolicy,
};
use anyhow::{anyhow, bail, Context, Result};
use num_traits::FromPrimitive;
use tracing::warn;

const PARAM_TOPIC: &str = "topic";
const PARAM_QOS_DEPTH: &str = "qos_depth";
const PARAM_QOS_HISTORY: &str = "qos_history";
const PARAM_REPORT_PERIOD_MILLIS: &str = "report_period_millis";
const PARAM_REPORT_CONNECTIONS: &str = "report_connections";
const PARAM_PUBLISH_ON_TICK: &str = "publish_on_tick";
const DEFAULT_TOPIC: &str = "topic";
const DEFAULT_QOS_DEPTH: usize = 10;
const DEFAULT_QOS_HISTORY: HistoryPolicy = HistoryPolicy::KEEP_LAST;
const DEFAULT_REPORT_PERIOD_MILLIS: u64 = 500;
const DEFAULT_REPORT_CONNECTIONS: bool = true;
const DEFAULT_PUBLISH_ON_TICK: bool = true;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub topic: String,
    pub qos: QosProfile,
    pub report_period_millis: u64,
    pub report_connections: bool,
    pub publish_on_tick: bool,
}

impl Params {
    pub fn load(node: &Node) -> Result<Self> {
        let params = node
            .params
            .lock()
            .map_err(|_| anyhow!("parameter store of node '{}' is poisoned", node.name()))?;
        Self::from_map(&params)
    }

    pub fn from_map(params: &ParamsMap) -> Result<Self> {
        let topic = get_topic(params)?;
        let qos = QosProfile {
            history: get_qos_history(params)?,
            depth: get_qos_depth(params)?,
        };
        let report_period_millis = get_report_period_millis(params)?;
        let report_connections =
            get_bool(params, PARAM_REPORT_CONNECTIONS, DEFAULT_REPORT_CONNECTIONS)?;
        let publish_on_tick = get_bool(params, PARAM_PUBLISH_ON_TICK, DEFAULT_PUBLISH_ON_TICK)?;
        Ok(Self {
            topic,
            qos,
            report_period_millis,
            report_connections,
            publish_on_tick,
        })
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            qos: QosProfile {
                history: DEFAULT_QOS_HISTORY,
                depth: DEFAULT_QOS_DEPTH,
            },
            report_period_millis: DEFAULT_REPORT_PERIOD_MILLIS,
            report_connections: DEFAULT_REPORT_CONNECTIONS,
            publish_on_tick: DEFAULT_PUBLISH_ON_TICK,
        }
    }
}

fn get_topic(params: &ParamsMap) -> Result<String> {
    let Some(value) = params.get(PARAM_TOPIC) else {
        warn!("Using default value '{}' for parameter '{}'", DEFAULT_TOPIC, PARAM_TOPIC);
        return Ok(DEFAULT_TOPIC.to_string());
    };
    let value = value
        .to_str()
        .ok_or_else(|| anyhow!("{PARAM_TOPIC} has invalid type"))?;
    Ok(value.to_string())
}

fn get_qos_depth(params: &ParamsMap) -> Result<usize> {
    let Some(value) = params.get(PARAM_QOS_DEPTH) else {
        warn!("Using default value '{}' for parameter '{}'", DEFAULT_QOS_DEPTH, PARAM_QOS_DEPTH);
        return Ok(DEFAULT_QOS_DEPTH);
    };
    let value = value
        .to_i64()
        .ok_or_else(|| anyhow!("{PARAM_QOS_DEPTH} has invalid type"))?;
    let value = value
        .try_into()
        .with_context(|| format!("invalid {PARAM_QOS_DEPTH} number {}", value))?;
    Ok(value)
}

/// Accepts the numeric policy value or its name.
fn get_qos_history(params: &ParamsMap) -> Result<HistoryPolicy> {
    let Some(value) = params.get(PARAM_QOS_HISTORY) else {
        warn!("Using default value '{:?}' for parameter '{}'", DEFAULT_QOS_HISTORY, PARAM_QOS_HISTORY);
        return Ok(DEFAULT_QOS_HISTORY);
    };
    if let Some(name) = value.to_str() {
        return name
            .parse()
            .with_context(|| format!("invalid {PARAM_QOS_HISTORY} '{name}'"));
    }
    let value = value
        .to_i64()
        .ok_or_else(|| anyhow!("{PARAM_QOS_HISTORY} has invalid type"))?;
    let Some(policy) = HistoryPolicy::from_i64(value) else {
        bail!("invalid {PARAM_QOS_HISTORY} number {}", value);
    };
    Ok(policy)
}

fn get_report_period_millis(params: &ParamsMap) -> Result<u64> {
    let Some(value) = params.get(PARAM_REPORT_PERIOD_MILLIS) else {
        warn!("Using default value '{}' for parameter '{}'", DEFAULT_REPORT_PERIOD_MILLIS, PARAM_REPORT_PERIOD_MILLIS);
        return Ok(DEFAULT_REPORT_PERIOD_MILLIS);
    };
    let value = value
        .to_i64()
        .ok_or_else(|| anyhow!("{PARAM_REPORT_PERIOD_MILLIS} has invalid type"))?;
    let value: u64 = value
        .try_into()
        .with_context(|| format!("invalid {PARAM_REPORT_PERIOD_MILLIS} number {}", value))?;
    if value == 0 {
        bail!("{PARAM_REPORT_PERIOD_MILLIS} must be positive");
    }
    Ok(value)
}

fn get_bool(params: &ParamsMap, name: &str, default: bool) -> Result<bool> {
    let Some(value) = params.get(name) else {
        warn!("Using default value '{}' for parameter '{}'", default, name);
        return Ok(default);
    };
    value
        .to_bool()
        .ok_or_else(|| anyhow!("{name} has invalid type"))
}

pub trait ParameterValueExt {
    fn to_str(&self) -> Option<&str>;
    fn to_i64(&self) -> Option<i64>;
    fn to_bool(&self) -> Option<bool>;
}

impl ParameterValueExt for ParameterValue {
    fn to_str(&self) -> Option<&str> {
        if let Self::String(val) = self {
            Some(val)
        } else {
            None
        }
    }

    fn to_i64(&self) -> Option<i64> {
        if let Self::Integer(val) = *self {
            Some(val)
        } else {
            None
        }
    }

    fn to_bool(&self) -> Option<bool> {
        if let Self::Bool(val) = *self {
            Some(val)
        } else {
            None
        }
    }
}
