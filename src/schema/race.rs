use serde::{Deserialize, Serialize};

/// Inclusive lifespan bounds for a race, in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    /// Fallback lifespan used when a race is unknown or has no range.
    pub const DEFAULT: AgeRange = AgeRange { min: 18, max: 80 };

    pub fn contains(&self, age: u32) -> bool {
        age >= self.min && age <= self.max
    }
}

/// A playable race. Determines age categorization and name pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "age_ranges")]
    pub age_ranges: Option<AgeRange>,
}

/// A character class. Only used as a compatibility tag source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterClass {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_range_contains_is_inclusive() {
        let range = AgeRange { min: 20, max: 300 };
        assert!(range.contains(20));
        assert!(range.contains(300));
        assert!(!range.contains(19));
        assert!(!range.contains(301));
    }

    #[test]
    fn race_accepts_both_key_styles() {
        let camel: Race =
            serde_json::from_str(r#"{"id":"elf","name":"Elf","ageRanges":{"min":20,"max":750}}"#)
                .unwrap();
        let snake: Race = ron::from_str(
            r#"(id: "elf", name: "Elf", age_ranges: Some((min: 20, max: 750)))"#,
        )
        .unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.age_ranges, Some(AgeRange { min: 20, max: 750 }));
    }

    #[test]
    fn race_without_range() {
        let race: Race = serde_json::from_str(r#"{"id":"construct","name":"Construct"}"#).unwrap();
        assert!(race.age_ranges.is_none());
    }
}
