use serde::{Deserialize, Serialize};

/// Body of a start request: how many entities of each kind to seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StartRequest {
    pub plants: u32,
    pub herbivores: u32,
    pub carnivores: u32,
}

impl StartRequest {
    #[must_use]
    pub fn new(plants: u32, herbivores: u32, carnivores: u32) -> Self {
        Self {
            plants,
            herbivores,
            carnivores,
        }
    }

    /// Total requested entities, widened so the sum cannot overflow.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.plants) + u64::from(self.herbivores) + u64::from(self.carnivores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parses_from_json() {
        let req: StartRequest =
            serde_json::from_str(r#"{"plants":5,"herbivores":2,"carnivores":1}"#).unwrap();
        assert_eq!(req, StartRequest::new(5, 2, 1));
        assert_eq!(req.total(), 8);
    }

    #[test]
    fn test_request_rejects_negative_counts() {
        let parsed =
            serde_json::from_str::<StartRequest>(r#"{"plants":-1,"herbivores":0,"carnivores":0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_total_does_not_overflow() {
        let req = StartRequest::new(u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(req.total(), 3 * u64::from(u32::MAX));
    }
}
