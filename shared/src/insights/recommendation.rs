//! Clothing, activity and preparation suggestions

use serde::{Deserialize, Serialize};

/// Suggestions grouped for display
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendations {
    pub clothing: Vec<String>,
    pub activities: Vec<String>,
    pub preparations: Vec<String>,
}

/// Temperature band, lower bounds inclusive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    /// Below 10°C
    Cold,
    /// 10°C up to 20°C
    Mild,
    /// 20°C and above
    Warm,
}

impl TemperatureBand {
    pub fn classify(temp_c: f64) -> Self {
        if temp_c < 10.0 {
            TemperatureBand::Cold
        } else if temp_c < 20.0 {
            TemperatureBand::Mild
        } else {
            TemperatureBand::Warm
        }
    }
}

/// Condition bucket matched from the provider's condition text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConditionBucket {
    Rain,
    Snow,
    Sun,
}

impl ConditionBucket {
    /// Case-insensitive substring match; rain beats snow beats sun/clear.
    pub fn classify(condition: &str) -> Option<Self> {
        let condition = condition.to_lowercase();
        if condition.contains("rain") {
            Some(ConditionBucket::Rain)
        } else if condition.contains("snow") {
            Some(ConditionBucket::Snow)
        } else if condition.contains("sunny") || condition.contains("clear") {
            Some(ConditionBucket::Sun)
        } else {
            None
        }
    }
}

/// Derive suggestions from the current temperature and condition text.
///
/// The temperature band always contributes one entry to every list; the
/// condition bucket appends to clothing and preparations when it matches.
pub fn recommend(temp_c: f64, condition: &str) -> Recommendations {
    let mut rec = Recommendations::default();

    match TemperatureBand::classify(temp_c) {
        TemperatureBand::Cold => {
            push_all(&mut rec.clothing, &["🧥 Heavy coat", "🧤 Gloves", "🧣 Scarf", "🎩 Warm hat"]);
            rec.activities.push("🏠 Indoor activities recommended".to_string());
            rec.preparations.push("❄️ Be prepared for cold weather".to_string());
        }
        TemperatureBand::Mild => {
            push_all(&mut rec.clothing, &["🧥 Light jacket", "👔 Long sleeves", "👖 Pants"]);
            rec.activities.push("🚶‍♂️ Light outdoor activities".to_string());
            rec.preparations.push("👔 Layer your clothing".to_string());
        }
        TemperatureBand::Warm => {
            push_all(&mut rec.clothing, &["🎽 Light clothing", "👕 Short sleeves", "🩳 Shorts"]);
            rec.activities.push("🏃‍♂️ Outdoor activities suitable".to_string());
            rec.preparations.push("💧 Stay hydrated".to_string());
        }
    }

    match ConditionBucket::classify(condition) {
        Some(ConditionBucket::Rain) => {
            push_all(&mut rec.clothing, &["🌂 Rain jacket", "👢 Waterproof shoes"]);
            rec.preparations.push("☔️ Bring an umbrella".to_string());
        }
        Some(ConditionBucket::Snow) => {
            push_all(&mut rec.clothing, &["❄️ Snow boots", "🧥 Waterproof clothing"]);
            rec.preparations.push("🚗 Check road conditions".to_string());
        }
        Some(ConditionBucket::Sun) => {
            push_all(&mut rec.clothing, &["🕶 Sunglasses", "🧢 Hat"]);
            rec.preparations.push("🧴 Apply sunscreen".to_string());
        }
        None => {}
    }

    rec
}

fn push_all(list: &mut Vec<String>, items: &[&str]) {
    list.extend(items.iter().map(|s| s.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cold_band() {
        let rec = recommend(-3.0, "Overcast");
        assert_eq!(
            rec.clothing,
            vec!["🧥 Heavy coat", "🧤 Gloves", "🧣 Scarf", "🎩 Warm hat"]
        );
        assert_eq!(rec.activities, vec!["🏠 Indoor activities recommended"]);
        assert_eq!(rec.preparations, vec!["❄️ Be prepared for cold weather"]);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(TemperatureBand::classify(9.99), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::classify(10.0), TemperatureBand::Mild);
        assert_eq!(TemperatureBand::classify(19.99), TemperatureBand::Mild);
        assert_eq!(TemperatureBand::classify(20.0), TemperatureBand::Warm);
    }

    #[test]
    fn test_hot_and_rainy_concatenates() {
        let rec = recommend(31.0, "Moderate RAIN at times");
        assert_eq!(
            rec.clothing,
            vec![
                "🎽 Light clothing",
                "👕 Short sleeves",
                "🩳 Shorts",
                "🌂 Rain jacket",
                "👢 Waterproof shoes",
            ]
        );
        assert_eq!(rec.preparations, vec!["💧 Stay hydrated", "☔️ Bring an umbrella"]);
        assert_eq!(rec.activities.len(), 1);
    }

    #[test]
    fn test_condition_priority() {
        assert_eq!(
            ConditionBucket::classify("Sunny with rain showers"),
            Some(ConditionBucket::Rain)
        );
        assert_eq!(
            ConditionBucket::classify("Light snow, clear later"),
            Some(ConditionBucket::Snow)
        );
        assert_eq!(ConditionBucket::classify("Clear"), Some(ConditionBucket::Sun));
        assert_eq!(ConditionBucket::classify("Partly cloudy"), None);
    }

    #[test]
    fn test_no_condition_match_adds_nothing() {
        let rec = recommend(15.0, "Fog");
        assert_eq!(rec.clothing.len(), 3);
        assert_eq!(rec.preparations, vec!["👔 Layer your clothing"]);
    }

    proptest! {
        #[test]
        fn prop_recommend_deterministic(temp in -60.0f64..60.0, cond in "[a-zA-Z ]{0,24}") {
            prop_assert_eq!(recommend(temp, &cond), recommend(temp, &cond));
        }

        #[test]
        fn prop_temperature_lists_never_empty(temp in -60.0f64..60.0, cond in "[a-zA-Z ]{0,24}") {
            let rec = recommend(temp, &cond);
            prop_assert!(rec.clothing.len() >= 3);
            prop_assert_eq!(rec.activities.len(), 1);
            prop_assert!(!rec.preparations.is_empty() && rec.preparations.len() <= 2);
        }

        #[test]
        fn prop_cold_always_indoor(temp in -60.0f64..9.999) {
            let rec = recommend(temp, "Sunny");
            prop_assert!(rec.clothing.contains(&"🧥 Heavy coat".to_string()));
            prop_assert_eq!(rec.activities[0].as_str(), "🏠 Indoor activities recommended");
        }
    }
}
