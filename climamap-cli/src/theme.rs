//! Backdrop theme picked from a weather description.

/// Keyword table, checked in order; the first match wins.
const RULES: &[(&[&str], Backdrop)] = &[
    (&["clear"], Backdrop::ClearSky),
    (&["few clouds"], Backdrop::FewClouds),
    (&["scattered clouds"], Backdrop::ScatteredClouds),
    (&["broken clouds"], Backdrop::BrokenClouds),
    (&["clouds"], Backdrop::Cloudy),
    (&["rain", "drizzle"], Backdrop::Rainy),
    (&["thunderstorm"], Backdrop::Stormy),
    (&["snow"], Backdrop::Snowy),
    (&["mist", "fog", "haze"], Backdrop::Misty),
    (&["smoke"], Backdrop::Smoky),
    (&["dust"], Backdrop::Dusty),
    (&["sand"], Backdrop::Sandy),
    (&["ash"], Backdrop::Ashy),
    (&["squall"], Backdrop::Squall),
    (&["tornado"], Backdrop::Tornado),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backdrop {
    ClearSky,
    FewClouds,
    ScatteredClouds,
    BrokenClouds,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
    Misty,
    Smoky,
    Dusty,
    Sandy,
    Ashy,
    Squall,
    Tornado,
    #[default]
    Default,
}

impl Backdrop {
    pub fn from_description(description: &str) -> Self {
        let description = description.to_lowercase();

        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| description.contains(k)))
            .map(|(_, backdrop)| *backdrop)
            .unwrap_or_default()
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Self::ClearSky => "clear-sky",
            Self::FewClouds => "few-clouds",
            Self::ScatteredClouds => "scattered-clouds",
            Self::BrokenClouds => "broken-clouds",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Stormy => "stormy",
            Self::Snowy => "snowy",
            Self::Misty => "misty",
            Self::Smoky => "smoky",
            Self::Dusty => "dusty",
            Self::Sandy => "sandy",
            Self::Ashy => "ashy",
            Self::Squall => "squall",
            Self::Tornado => "tornado",
            Self::Default => "default-bg",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::ClearSky => "#87CEEB",
            Self::FewClouds => "#B2DFDB",
            Self::ScatteredClouds => "#AED6F1",
            Self::BrokenClouds => "#85929E",
            Self::Cloudy => "#B0C4DE",
            Self::Rainy => "#5DADE2",
            Self::Stormy => "#34495E",
            Self::Snowy => "#F8F8FF",
            Self::Misty => "#D3D3D3",
            Self::Smoky => "#A1887F",
            Self::Dusty => "#F4E2D8",
            Self::Sandy => "#F7DC6F",
            Self::Ashy => "#616161",
            Self::Squall => "#7FB3D5",
            Self::Tornado => "#7D3C98",
            Self::Default => "#f0f2f6",
        }
    }

    /// 24-bit ANSI background escape for the backdrop color.
    pub fn ansi_background(&self) -> String {
        let hex = self.color().trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        format!("\x1b[48;2;{};{};{}m", channel(0), channel(2), channel(4))
    }
}
