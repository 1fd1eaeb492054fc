//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Look up current weather for a city.
    ///
    /// `city` is the submitted query with surrounding whitespace trimmed;
    /// the search input itself keeps what was typed.
    FetchWeather { city: String },
}
