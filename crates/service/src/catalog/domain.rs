use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryInput {
    pub name: String,
    pub symbol: String,
}

/// A city is created inside an existing country, or together with a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCityInput {
    pub name: String,
    pub country: CountryInput,
}
