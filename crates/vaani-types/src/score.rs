use serde::{Serialize, Serializer};

/// Feedback band derived from an integer score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Feedback {
    /// Bands are evaluated top-down, first match wins
    pub fn from_score(score: u8) -> Self {
        if score > 85 {
            Feedback::Excellent
        } else if score > 70 {
            Feedback::Good
        } else if score > 50 {
            Feedback::Average
        } else {
            Feedback::Poor
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Excellent => "Excellent pronunciation.",
            Feedback::Good => "Good pronunciation.",
            Feedback::Average => "Average, needs improvement.",
            Feedback::Poor => "Poor pronunciation. Practice more.",
        }
    }
}

impl Serialize for Feedback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// 0..=100
    pub score: u8,
    /// 0.0..=1.0, rounded to 3 decimals
    pub similarity: f64,
    pub feedback: Feedback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(Feedback::from_score(100), Feedback::Excellent);
        assert_eq!(Feedback::from_score(86), Feedback::Excellent);
        assert_eq!(Feedback::from_score(85), Feedback::Good);
        assert_eq!(Feedback::from_score(71), Feedback::Good);
        assert_eq!(Feedback::from_score(70), Feedback::Average);
        assert_eq!(Feedback::from_score(51), Feedback::Average);
        assert_eq!(Feedback::from_score(50), Feedback::Poor);
        assert_eq!(Feedback::from_score(0), Feedback::Poor);
    }

    #[test]
    fn test_serializes_feedback_as_message() {
        let result = ScoreResult {
            score: 80,
            similarity: 0.8,
            feedback: Feedback::Good,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["feedback"], "Good pronunciation.");
        assert_eq!(json["score"], 80);
    }
}
