/// One business and its postal address, as written to a CSV row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressRecord {
    /// Business name (razón social)
    pub name: String,
    pub street: String,
    /// Street number, empty when the page does not list one
    pub number: String,
    /// Neighborhood (colonia)
    pub block: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

impl AddressRecord {
    /// Column headers, in row order
    pub const HEADER: [&'static str; 8] = [
        "Razón social",
        "Calle",
        "Número",
        "Colonia",
        "Ciudad",
        "Estado",
        "País",
        "CP",
    ];

    /// Field values in the same order as [`AddressRecord::HEADER`]
    pub fn fields(&self) -> [&str; 8] {
        [
            self.name.as_str(),
            self.street.as_str(),
            self.number.as_str(),
            self.block.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.country.as_str(),
            self.postal_code.as_str(),
        ]
    }
}
