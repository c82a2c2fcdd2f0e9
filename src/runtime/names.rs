//! Validation and resolution of node names, namespaces and topic names.

use super::{Error, Result};

fn token_error(token: &str) -> Option<&'static str> {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return Some("contains an empty token");
    };
    if first.is_ascii_digit() {
        return Some("tokens must not start with a digit");
    }
    if !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("only alphanumerics and '_' are allowed");
    }
    None
}

pub fn validate_node_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else {
        token_error(name)
    };
    match reason {
        Some(reason) => Err(Error::InvalidNodeName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

pub fn validate_namespace(namespace: &str) -> Result<()> {
    let err = |reason| {
        Err(Error::InvalidNamespace {
            namespace: namespace.to_string(),
            reason,
        })
    };
    let Some(rest) = namespace.strip_prefix('/') else {
        return err("must be absolute");
    };
    if rest.is_empty() {
        return Ok(());
    }
    match rest.split('/').find_map(token_error) {
        Some(reason) => err(reason),
        None => Ok(()),
    }
}

/// Resolves `topic` against `namespace` and validates the result.
pub fn resolve_topic_name(namespace: &str, topic: &str) -> Result<String> {
    let err = |reason| Error::InvalidTopicName {
        topic: topic.to_string(),
        reason,
    };
    if topic.is_empty() {
        return Err(err("must not be empty"));
    }
    if topic.starts_with('~') {
        return Err(err("private names are not supported"));
    }
    if topic.ends_with('/') {
        return Err(err("must not end with '/'"));
    }

    let resolved = if topic.starts_with('/') {
        topic.to_string()
    } else if namespace == "/" {
        format!("/{topic}")
    } else {
        format!("{namespace}/{topic}")
    };

    if let Some(reason) = resolved[1..].split('/').find_map(token_error) {
        return Err(err(reason));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_names() {
        assert!(validate_node_name("talker").is_ok());
        assert!(validate_node_name("node_2").is_ok());
        assert!(validate_node_name("").is_err());
        assert!(validate_node_name("2node").is_err());
        assert!(validate_node_name("my-node").is_err());
        assert!(validate_node_name("a/b").is_err());
    }

    #[test]
    fn namespaces() {
        assert!(validate_namespace("/").is_ok());
        assert!(validate_namespace("/robot/arm").is_ok());
        assert!(validate_namespace("robot").is_err());
        assert!(validate_namespace("/robot/").is_err());
        assert!(validate_namespace("//robot").is_err());
    }

    #[test]
    fn topic_resolution() {
        assert_eq!(resolve_topic_name("/", "topic").unwrap(), "/topic");
        assert_eq!(resolve_topic_name("/ns", "topic").unwrap(), "/ns/topic");
        assert_eq!(resolve_topic_name("/ns", "/abs/t").unwrap(), "/abs/t");
        assert!(resolve_topic_name("/", "").is_err());
        assert!(resolve_topic_name("/", "~/private").is_err());
        assert!(resolve_topic_name("/", "topic/").is_err());
        assert!(resolve_topic_name("/", "bad topic").is_err());
        assert!(resolve_topic_name("/", "/9lives").is_err());
    }
}
