//! Playful one-sentence reading of the current conditions

use crate::models::Observation;

/// Hours before this are "day" for the daytime-split fragments
const EVENING_HOUR: u32 = 17;

/// Compose the interpretation sentence for an observation.
///
/// Fragments are emitted in a fixed order (greeting, temperature, condition,
/// humidity, wind) and joined with single spaces. An unparseable local time
/// selects the night greeting and the night variants.
pub fn interpret(observation: &Observation) -> String {
    let current = &observation.current;
    let hour = observation.local_hour();
    let condition = current.condition.text.to_lowercase();

    let fragments = [
        Some(greeting(hour)),
        Some(temperature_fragment(current.temp_c, is_daytime(hour))),
        condition_fragment(&condition, is_daytime(hour)),
        humidity_fragment(current.humidity),
        wind_fragment(current.wind_kph),
    ];

    fragments
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn is_daytime(hour: Option<u32>) -> bool {
    matches!(hour, Some(h) if h < EVENING_HOUR)
}

fn greeting(hour: Option<u32>) -> &'static str {
    match hour {
        Some(5..=11) => "🌅 Good morning!",
        Some(12..=16) => "☀️ Good afternoon!",
        Some(17..=20) => "🌆 Good evening!",
        _ => "🌙 Hey night owl!",
    }
}

fn temperature_fragment(temp_c: f64, day: bool) -> &'static str {
    if temp_c < 10.0 {
        pick(day, "❄️ Bundle up for the day ahead!", "❄️ Extra blanket kind of night!")
    } else if temp_c < 20.0 {
        pick(day, "🧥 Perfect weather for getting things done!", "🌟 Nice evening for a stroll!")
    } else if temp_c < 30.0 {
        pick(day, "👕 Great day for outdoor activities!", "✨ Lovely evening for outdoor dining!")
    } else {
        pick(
            day,
            "🥵 Find some shade and stay hydrated!",
            "🌴 Warm night ahead - keep those windows open!",
        )
    }
}

fn condition_fragment(condition: &str, day: bool) -> Option<&'static str> {
    let fragment = if condition.contains("rain") {
        pick(day, "☔️ Don't forget your umbrella today!", "🌧️ Cozy indoor evening ahead!")
    } else if condition.contains("cloud") {
        pick(day, "☁️ Moody skies but still a great day!", "🌥️ Clouds making for a gentle evening.")
    } else if condition.contains("sunny") {
        pick(day, "😎 Sun's out, fun's out!", "🌅 Beautiful sunset potential!")
    } else if condition.contains("snow") {
        pick(day, "⛄️ Perfect for winter activities!", "❄️ Magical snowy evening!")
    } else {
        return None;
    };
    Some(fragment)
}

fn humidity_fragment(humidity: f64) -> Option<&'static str> {
    if humidity > 80.0 {
        Some("💦 Feeling pretty sticky out there!")
    } else if humidity < 30.0 {
        Some("🏜️ It's drier than a desert today.")
    } else {
        None
    }
}

fn wind_fragment(wind_kph: f64) -> Option<&'static str> {
    if wind_kph > 30.0 {
        Some("🌪️ Hold onto your hat!")
    } else if wind_kph > 15.0 {
        Some("🍃 Nice breeze to keep things fresh.")
    } else {
        None
    }
}

fn pick(day: bool, day_text: &'static str, night_text: &'static str) -> &'static str {
    if day {
        day_text
    } else {
        night_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Condition, CurrentConditions, Forecast, ObservedLocation,
    };
    use proptest::prelude::*;

    fn observation(
        localtime: &str,
        temp_c: f64,
        text: &str,
        humidity: f64,
        wind_kph: f64,
    ) -> Observation {
        Observation {
            location: ObservedLocation {
                name: "Oslo".to_string(),
                region: "Oslo".to_string(),
                country: "Norway".to_string(),
                lat: 59.91,
                lon: 10.75,
                localtime: localtime.to_string(),
            },
            current: CurrentConditions {
                temp_c,
                temp_f: temp_c * 9.0 / 5.0 + 32.0,
                condition: Condition {
                    text: text.to_string(),
                    icon: String::new(),
                    code: 1000,
                },
                wind_kph,
                wind_dir: "N".to_string(),
                pressure_mb: 1012.0,
                precip_mm: 0.0,
                humidity,
                feelslike_c: temp_c,
                uv: 1.0,
            },
            forecast: Forecast { forecastday: Vec::new() },
            alerts: None,
        }
    }

    #[test]
    fn test_morning_rainy_cold() {
        let text = interpret(&observation("2024-01-15 8:10", 4.0, "Light rain", 85.0, 20.0));
        assert_eq!(
            text,
            "🌅 Good morning! ❄️ Bundle up for the day ahead! ☔️ Don't forget your umbrella today! \
             💦 Feeling pretty sticky out there! 🍃 Nice breeze to keep things fresh."
        );
    }

    #[test]
    fn test_evening_uses_night_variants() {
        let text = interpret(&observation("2024-07-01 18:00", 25.0, "Partly cloudy", 50.0, 5.0));
        assert_eq!(
            text,
            "🌆 Good evening! ✨ Lovely evening for outdoor dining! \
             🌥️ Clouds making for a gentle evening."
        );
    }

    #[test]
    fn test_minimal_sentence_has_no_trailing_space() {
        let text = interpret(&observation("2024-07-01 13:00", 15.0, "Mist", 50.0, 0.0));
        assert_eq!(text, "☀️ Good afternoon! 🧥 Perfect weather for getting things done!");
    }

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting(Some(0)), "🌙 Hey night owl!");
        assert_eq!(greeting(Some(4)), "🌙 Hey night owl!");
        assert_eq!(greeting(Some(5)), "🌅 Good morning!");
        assert_eq!(greeting(Some(12)), "☀️ Good afternoon!");
        assert_eq!(greeting(Some(17)), "🌆 Good evening!");
        assert_eq!(greeting(Some(21)), "🌙 Hey night owl!");
        assert_eq!(greeting(Some(23)), "🌙 Hey night owl!");
        assert_eq!(greeting(None), "🌙 Hey night owl!");
    }

    #[test]
    fn test_temperature_boundaries() {
        assert_eq!(temperature_fragment(10.0, true), "🧥 Perfect weather for getting things done!");
        assert_eq!(temperature_fragment(20.0, true), "👕 Great day for outdoor activities!");
        assert_eq!(
            temperature_fragment(30.0, false),
            "🌴 Warm night ahead - keep those windows open!"
        );
    }

    #[test]
    fn test_humidity_and_wind_thresholds() {
        assert_eq!(humidity_fragment(80.0), None);
        assert_eq!(humidity_fragment(30.0), None);
        assert!(humidity_fragment(29.9).is_some());
        assert_eq!(wind_fragment(30.0), Some("🍃 Nice breeze to keep things fresh."));
        assert_eq!(wind_fragment(15.0), None);
        assert_eq!(wind_fragment(30.1), Some("🌪️ Hold onto your hat!"));
    }

    #[test]
    fn test_unparseable_localtime_reads_as_night() {
        let text = interpret(&observation("garbage", 12.0, "Sunny", 50.0, 0.0));
        assert_eq!(
            text,
            "🌙 Hey night owl! 🌟 Nice evening for a stroll! 🌅 Beautiful sunset potential!"
        );
    }

    proptest! {
        #[test]
        fn prop_interpret_is_total(
            hour in 0u32..24,
            temp in -50.0f64..55.0,
            humidity in 0.0f64..=100.0,
            wind in 0.0f64..150.0,
            text in "[a-zA-Z ]{0,20}",
        ) {
            let localtime = format!("2024-05-01 {}:00", hour);
            let sentence = interpret(&observation(&localtime, temp, &text, humidity, wind));
            prop_assert!(!sentence.is_empty());
            prop_assert_eq!(sentence.trim(), sentence.as_str());
            prop_assert!(!sentence.contains("  "));
        }
    }
}
