//! Message catalog: message key -> default display text.

use std::collections::HashMap;

use serde::Deserialize;

/// Default-language display strings keyed by message id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Messages {
    entries: HashMap<String, String>,
}

impl Messages {
    #[must_use]
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Text for `key`, or `default` when the catalog has no entry.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.entries.get(key).map_or(default, String::as_str)
    }

    /// Text for `key`, falling back to the key itself.
    #[must_use]
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.get_or(key, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks() {
        let messages = Messages::new(HashMap::from([(
            "cartItems".to_string(),
            "items".to_string(),
        )]));
        assert_eq!(messages.get("cartItems"), "items");
        assert_eq!(messages.get("groceriesTitle"), "groceriesTitle");
        assert_eq!(messages.get_or("cartItem", "item"), "item");
    }
}
