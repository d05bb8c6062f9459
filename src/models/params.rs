//! Query parameter DTOs for the cache server API
//!
//! The set endpoints take their inputs as query parameters; every field
//! is optional at the deserialization layer so that missing parameters
//! surface as a 400 with a descriptive message instead of a rejection.

use serde::Deserialize;

/// Query parameters for the SET operation (POST /cache)
#[derive(Debug, Clone, Deserialize)]
pub struct SetParams {
    /// The cache key
    pub key: Option<String>,
    /// The value to store
    pub value: Option<String>,
}

impl SetParams {
    /// Validates the parameters and unwraps them.
    ///
    /// Returns an error message if `key` or `value` is missing or empty.
    pub fn into_parts(self) -> Result<(String, String), String> {
        let key = match self.key {
            Some(key) if !key.is_empty() => key,
            _ => return Err("Query parameter 'key' is required".to_string()),
        };
        let value = match self.value {
            Some(value) if !value.is_empty() => value,
            _ => return Err("Query parameter 'value' is required".to_string()),
        };
        Ok((key, value))
    }
}

/// Query parameters for the SET-with-expiration operation
/// (POST /cache/setWithExpiration)
#[derive(Debug, Clone, Deserialize)]
pub struct SetWithExpirationParams {
    /// The cache key
    pub key: Option<String>,
    /// The value to store
    pub value: Option<String>,
    /// TTL in seconds
    #[serde(rename = "expirationInSeconds")]
    pub expiration_in_seconds: Option<u64>,
}

impl SetWithExpirationParams {
    /// Validates the parameters and unwraps them.
    pub fn into_parts(self) -> Result<(String, String, u64), String> {
        let (key, value) = SetParams {
            key: self.key,
            value: self.value,
        }
        .into_parts()?;
        let ttl_secs = self
            .expiration_in_seconds
            .ok_or_else(|| "Query parameter 'expirationInSeconds' is required".to_string())?;
        Ok((key, value, ttl_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_params_deserialize() {
        let params: SetParams = serde_json::from_str(r#"{"key": "test", "value": "hello"}"#).unwrap();
        assert_eq!(params.into_parts().unwrap(), ("test".to_string(), "hello".to_string()));
    }

    #[test]
    fn test_set_params_missing_key() {
        let params = SetParams {
            key: None,
            value: Some("v".to_string()),
        };
        assert!(params.into_parts().is_err());
    }

    #[test]
    fn test_set_params_empty_value() {
        let params = SetParams {
            key: Some("k".to_string()),
            value: Some("".to_string()),
        };
        assert!(params.into_parts().is_err());
    }

    #[test]
    fn test_expiration_params_deserialize() {
        let json = r#"{"key": "test", "value": "hello", "expirationInSeconds": 60}"#;
        let params: SetWithExpirationParams = serde_json::from_str(json).unwrap();
        let (key, value, ttl) = params.into_parts().unwrap();
        assert_eq!(key, "test");
        assert_eq!(value, "hello");
        assert_eq!(ttl, 60);
    }

    #[test]
    fn test_expiration_params_missing_ttl() {
        let params = SetWithExpirationParams {
            key: Some("k".to_string()),
            value: Some("v".to_string()),
            expiration_in_seconds: None,
        };
        assert!(params.into_parts().is_err());
    }
}
