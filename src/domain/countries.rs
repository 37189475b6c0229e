//! European country allow-list used to filter the emissions table.
//!
//! Names follow the Kaggle/World Bank spelling used by the source CSV
//! (e.g. "Russian Federation", "Czech Republic").

pub const EUROPEAN_COUNTRIES: [&str; 45] = [
    "Albania",
    "Andorra",
    "Austria",
    "Belarus",
    "Belgium",
    "Bosnia and Herzegovina",
    "Bulgaria",
    "Croatia",
    "Cyprus",
    "Czech Republic",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "Ireland",
    "Italy",
    "Kosovo",
    "Latvia",
    "Liechtenstein",
    "Lithuania",
    "Luxembourg",
    "Malta",
    "Moldova",
    "Monaco",
    "Montenegro",
    "Netherlands",
    "North Macedonia",
    "Norway",
    "Poland",
    "Portugal",
    "Romania",
    "Russian Federation",
    "San Marino",
    "Serbia",
    "Slovakia",
    "Slovenia",
    "Spain",
    "Sweden",
    "Switzerland",
    "Ukraine",
    "United Kingdom",
];

/// Exact, case-sensitive match (callers trim first).
pub fn is_european(country: &str) -> bool {
    EUROPEAN_COUNTRIES.contains(&country)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_membership() {
        assert!(is_european("Germany"));
        assert!(is_european("Bosnia and Herzegovina"));
        assert!(!is_european("Canada"));
        assert!(!is_european("germany"));
    }
}
