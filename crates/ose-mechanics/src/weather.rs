//! Daily weather by region and season.

use ose_core::RandomSource;
use ose_core::random::choose;
use serde::{Deserialize, Serialize};

/// Weather for temperate regions outside winter.
pub const BASE_WEATHER: &[&str] = &["clear", "overcast", "rain", "wind", "storm"];
/// Extra possibilities in winter.
pub const WINTER_WEATHER: &[&str] = &["snow", "freezing rain"];
/// Desert weather, regardless of season.
pub const DESERT_WEATHER: &[&str] = &["clear", "hot wind", "dust", "heatwave", "sandstorm"];

/// A rolled day of weather.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRoll {
    /// Region, lowercased.
    pub region: String,
    /// Season, lowercased.
    pub season: String,
    /// The weather.
    pub weather: String,
}

fn normalized(value: &str, fallback: &str) -> String {
    match value.trim() {
        "" => fallback.to_string(),
        v => v.to_lowercase(),
    }
}

/// The possible weather for a region and season.
pub fn weather_options(region: &str, season: &str) -> Vec<&'static str> {
    if region == "desert" {
        return DESERT_WEATHER.to_vec();
    }
    let mut options = BASE_WEATHER.to_vec();
    if season == "winter" {
        options.extend_from_slice(WINTER_WEATHER);
    }
    options
}

/// Roll the day's weather. A blank region is temperate and a blank season is
/// spring.
pub fn weather_roll<R>(region: &str, season: &str, rng: &mut R) -> WeatherRoll
where
    R: RandomSource + ?Sized,
{
    let region = normalized(region, "temperate");
    let season = normalized(season, "spring");
    let options = weather_options(&region, &season);
    let weather = choose(&options, rng).copied().unwrap_or("clear").to_string();
    WeatherRoll {
        region,
        season,
        weather,
    }
}
