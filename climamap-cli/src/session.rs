use climamap_core::Units;

/// State of one interactive session. Each action overwrites it; last write wins.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub city: Option<String>,
    pub units: Units,
    pub initial_load: bool,
}

impl SessionState {
    pub fn new(units: Units) -> Self {
        Self { city: None, units, initial_load: true }
    }

    /// Consume the first-load flag. Returns true only once per session.
    pub fn take_initial_load(&mut self) -> bool {
        std::mem::replace(&mut self.initial_load, false)
    }

    /// Seed the city from an approximate location, unless one is already set.
    pub fn seed_city(&mut self, approximate: Option<String>) {
        if self.city.is_none() {
            self.city = approximate;
        }
    }

    /// Replace the selected city with user input. Blank input clears it and returns false.
    pub fn submit_city(&mut self, input: &str) -> bool {
        let city = input.trim();
        if city.is_empty() {
            self.city = None;
            return false;
        }
        self.city = Some(city.to_string());
        true
    }

    /// Take the city name the provider resolved for a map pick.
    pub fn resolve_city(&mut self, provider_city: String) {
        self.city = Some(provider_city);
    }

    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }
}
