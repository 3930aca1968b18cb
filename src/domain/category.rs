use serde::{Deserialize, Serialize};

/// The four tracked habit categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Water,
    Meat,
    Sleep,
    Gym,
}

/// Per-date habit flags. A date with no stored record is all-false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryState {
    #[serde(default)]
    pub water: bool,
    #[serde(default)]
    pub meat: bool,
    #[serde(default)]
    pub sleep: bool,
    #[serde(default)]
    pub gym: bool,
}

impl CategoryState {
    /// Set one flag, leaving the other three untouched.
    pub fn set(&mut self, key: CategoryKey, value: bool) {
        match key {
            CategoryKey::Water => self.water = value,
            CategoryKey::Meat => self.meat = value,
            CategoryKey::Sleep => self.sleep = value,
            CategoryKey::Gym => self.gym = value,
        }
    }

    pub fn get(&self, key: CategoryKey) -> bool {
        match key {
            CategoryKey::Water => self.water,
            CategoryKey::Meat => self.meat,
            CategoryKey::Sleep => self.sleep,
            CategoryKey::Gym => self.gym,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_all_false() {
        let state = CategoryState::default();
        assert!(!state.water && !state.meat && !state.sleep && !state.gym);
    }

    #[test]
    fn test_set_touches_only_one_flag() {
        let mut state = CategoryState::default();
        state.set(CategoryKey::Gym, true);
        assert!(state.get(CategoryKey::Gym));
        assert!(!state.water && !state.meat && !state.sleep);

        state.set(CategoryKey::Gym, false);
        assert!(!state.get(CategoryKey::Gym));
    }

    #[test]
    fn test_key_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CategoryKey::Water).unwrap(), "\"water\"");
        let key: CategoryKey = serde_json::from_str("\"gym\"").unwrap();
        assert_eq!(key, CategoryKey::Gym);
        assert!(serde_json::from_str::<CategoryKey>("\"coffee\"").is_err());
    }
}
