//! Text rendering of weather cards and the forecast strip.

use climamap_core::{DailySummary, Units, WeatherReading};
use std::fmt;

use crate::theme::Backdrop;

const RESET: &str = "\x1b[0m";

/// Current-weather card. `color` adds a backdrop swatch in the theme color.
pub fn weather_card(reading: &WeatherReading, units: Units, color: bool) -> String {
    WeatherCard { reading, units, color }.to_string()
}

/// One line per day: label, max / min, description, icon.
pub fn forecast_strip(city: &str, days: &[DailySummary], units: Units) -> String {
    ForecastStrip { city, days, units }.to_string()
}

struct WeatherCard<'a> {
    reading: &'a WeatherReading,
    units: Units,
    color: bool,
}

impl fmt::Display for WeatherCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reading = self.reading;
        let backdrop = Backdrop::from_description(&reading.description);

        writeln!(f, "Current Weather in {} ({})", reading.city, self.units.label())?;
        writeln!(f, "  Temperature: {} {}", reading.temperature, self.units.symbol())?;
        writeln!(f, "  Humidity:    {}%", reading.humidity)?;
        writeln!(f, "  Conditions:  {}", reading.description)?;
        writeln!(f, "  Location:    {:.4}, {:.4}", reading.latitude, reading.longitude)?;

        if self.color {
            writeln!(
                f,
                "  Theme:       {}    {RESET} {} ({})",
                backdrop.ansi_background(),
                backdrop.class_name(),
                backdrop.color()
            )
        } else {
            writeln!(f, "  Theme:       {} ({})", backdrop.class_name(), backdrop.color())
        }
    }
}

struct ForecastStrip<'a> {
    city: &'a str,
    days: &'a [DailySummary],
    units: Units,
}

impl fmt::Display for ForecastStrip<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.units.symbol();

        writeln!(f, "5-Day Forecast for {} ({})", self.city, self.units.label())?;

        if self.days.is_empty() {
            return writeln!(f, "  No forecast data available.");
        }

        let width = self.days.iter().map(|d| d.label().chars().count()).max().unwrap_or(0);
        for day in self.days {
            writeln!(
                f,
                "  {:<width$} | {:.1}{symbol} / {:.1}{symbol} | {} | {}",
                day.label(),
                day.temperature_max,
                day.temperature_min,
                day.description,
                day.icon_url(),
            )?;
        }

        Ok(())
    }
}
