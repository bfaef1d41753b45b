//! Callback payloads for the stock view's product buttons.
//!
//! A button carries `prod_<id>`; clicking it sends that string back as the
//! callback query data.

/// Literal prefix of every product selector payload
pub const SELECTOR_PREFIX: &str = "prod";

/// A product id as carried by a stock button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorId(pub i64);

/// Malformed selector payload
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Payload does not start with `prod_`
    MissingPrefix(String),
    /// Text after the prefix is not a decimal id
    InvalidId(String),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::MissingPrefix(data) => {
                write!(f, "Selector payload lacks '{SELECTOR_PREFIX}_' prefix: {data:?}")
            }
            DecodeError::InvalidId(data) => write!(f, "Selector payload has invalid id: {data:?}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl SelectorId {
    pub fn encode(self) -> String {
        format!("{SELECTOR_PREFIX}_{}", self.0)
    }

    pub fn decode(data: &str) -> Result<Self, DecodeError> {
        let raw_id = data
            .strip_prefix(SELECTOR_PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .ok_or_else(|| DecodeError::MissingPrefix(data.to_string()))?;

        raw_id
            .parse::<i64>()
            .map(SelectorId)
            .map_err(|_| DecodeError::InvalidId(data.to_string()))
    }

    pub fn id(self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_format() {
        assert_eq!(SelectorId(42).encode(), "prod_42");
    }

    #[test]
    fn test_decode_valid() {
        assert_eq!(SelectorId::decode("prod_7"), Ok(SelectorId(7)));
        assert_eq!(SelectorId::decode(&SelectorId(1234).encode()), Ok(SelectorId(1234)));
    }

    #[test]
    fn test_decode_wrong_prefix() {
        assert!(matches!(
            SelectorId::decode("item_7"),
            Err(DecodeError::MissingPrefix(_))
        ));
        assert!(matches!(
            SelectorId::decode("prod7"),
            Err(DecodeError::MissingPrefix(_))
        ));
        assert!(matches!(
            SelectorId::decode(""),
            Err(DecodeError::MissingPrefix(_))
        ));
    }

    #[test]
    fn test_decode_invalid_id() {
        assert!(matches!(
            SelectorId::decode("prod_"),
            Err(DecodeError::InvalidId(_))
        ));
        assert!(matches!(
            SelectorId::decode("prod_abc"),
            Err(DecodeError::InvalidId(_))
        ));
        assert!(matches!(
            SelectorId::decode("prod_5_extra"),
            Err(DecodeError::InvalidId(_))
        ));
    }

    #[test]
    fn test_decode_error_display() {
        let err = SelectorId::decode("prod_x").unwrap_err();
        assert_eq!(err.to_string(), "Selector payload has invalid id: \"prod_x\"");
    }
}
