/// Plain text message, the payload exchanged by the demo node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringMsg {
    pub data: String,
}

impl From<&str> for StringMsg {
    fn from(data: &str) -> Self {
        Self {
            data: data.to_string(),
        }
    }
}

impl From<String> for StringMsg {
    fn from(data: String) -> Self {
        Self { data }
    }
}
