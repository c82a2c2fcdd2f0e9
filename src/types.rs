use anyhow::bail;
use num_derive::FromPrimitive;
use std::{fmt, str::FromStr};

/// History policy values as numbered by the middleware's QoS constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[allow(non_camel_case_types)]
#[repr(u8)]
pub enum HistoryPolicy {
    SYSTEM_DEFAULT = 0,
    KEEP_LAST = 1,
    KEEP_ALL = 2,
}

impl FromStr for HistoryPolicy {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(match text {
            "system_default" => Self::SYSTEM_DEFAULT,
            "keep_last" => Self::KEEP_LAST,
            "keep_all" => Self::KEEP_ALL,
            _ => bail!("Unsupported history policy '{}'", text),
        })
    }
}

/// Role of a pub/sub endpoint. Fixed when the endpoint is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Publisher,
    Subscriber,
}

impl Role {
    /// The role whose endpoints count as peers of this one.
    pub fn opposite(self) -> Self {
        match self {
            Role::Publisher => Role::Subscriber,
            Role::Subscriber => Role::Publisher,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Publisher => f.write_str("publisher"),
            Role::Subscriber => f.write_str("subscriber"),
        }
    }
}
