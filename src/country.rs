//! Countries served by the BuscaPé API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported BuscaPé countries. The country code is part of every request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Ar,
    #[default]
    Br,
    Cl,
    Co,
    Mx,
    Pe,
    Ve,
}

impl Country {
    /// Returns the uppercase wire code used in the request path.
    pub fn code(&self) -> &'static str {
        match self {
            Country::Ar => "AR",
            Country::Br => "BR",
            Country::Cl => "CL",
            Country::Co => "CO",
            Country::Mx => "MX",
            Country::Pe => "PE",
            Country::Ve => "VE",
        }
    }

    /// Returns all supported countries.
    pub fn all() -> &'static [Country] {
        &[
            Country::Ar,
            Country::Br,
            Country::Cl,
            Country::Co,
            Country::Mx,
            Country::Pe,
            Country::Ve,
        ]
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Country::Ar => "ar",
            Country::Br => "br",
            Country::Cl => "cl",
            Country::Co => "co",
            Country::Mx => "mx",
            Country::Pe => "pe",
            Country::Ve => "ve",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Country {
    type Err = CountryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ar" | "argentina" => Ok(Country::Ar),
            "br" | "brazil" => Ok(Country::Br),
            "cl" | "chile" => Ok(Country::Cl),
            "co" | "colombia" => Ok(Country::Co),
            "mx" | "mexico" => Ok(Country::Mx),
            "pe" | "peru" => Ok(Country::Pe),
            "ve" | "venezuela" => Ok(Country::Ve),
            _ => Err(CountryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CountryParseError(String);

impl fmt::Display for CountryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown country '{}'. Valid countries: ar, br, cl, co, mx, pe, ve",
            self.0
        )
    }
}

impl std::error::Error for CountryParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_parsing_all() {
        assert_eq!(Country::from_str("ar").unwrap(), Country::Ar);
        assert_eq!(Country::from_str("argentina").unwrap(), Country::Ar);
        assert_eq!(Country::from_str("br").unwrap(), Country::Br);
        assert_eq!(Country::from_str("brazil").unwrap(), Country::Br);
        assert_eq!(Country::from_str("cl").unwrap(), Country::Cl);
        assert_eq!(Country::from_str("chile").unwrap(), Country::Cl);
        assert_eq!(Country::from_str("co").unwrap(), Country::Co);
        assert_eq!(Country::from_str("colombia").unwrap(), Country::Co);
        assert_eq!(Country::from_str("mx").unwrap(), Country::Mx);
        assert_eq!(Country::from_str("mexico").unwrap(), Country::Mx);
        assert_eq!(Country::from_str("pe").unwrap(), Country::Pe);
        assert_eq!(Country::from_str("peru").unwrap(), Country::Pe);
        assert_eq!(Country::from_str("ve").unwrap(), Country::Ve);
        assert_eq!(Country::from_str("venezuela").unwrap(), Country::Ve);

        // Case insensitive
        assert_eq!(Country::from_str("BR").unwrap(), Country::Br);
        assert_eq!(Country::from_str("ARGENTINA").unwrap(), Country::Ar);

        // Invalid
        assert!(Country::from_str("invalid").is_err());
        assert!(Country::from_str("").is_err());
    }

    #[test]
    fn test_country_codes_all() {
        assert_eq!(Country::Ar.code(), "AR");
        assert_eq!(Country::Br.code(), "BR");
        assert_eq!(Country::Cl.code(), "CL");
        assert_eq!(Country::Co.code(), "CO");
        assert_eq!(Country::Mx.code(), "MX");
        assert_eq!(Country::Pe.code(), "PE");
        assert_eq!(Country::Ve.code(), "VE");
    }

    #[test]
    fn test_country_display() {
        assert_eq!(Country::Br.to_string(), "br");
        assert_eq!(Country::Mx.to_string(), "mx");
    }

    #[test]
    fn test_country_default() {
        assert_eq!(Country::default(), Country::Br);
    }

    #[test]
    fn test_country_all() {
        let all = Country::all();
        assert_eq!(all.len(), 7);
        assert!(all.contains(&Country::Br));
        assert!(all.contains(&Country::Ve));
    }

    #[test]
    fn test_country_parse_error_display() {
        let err = Country::from_str("xyz").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("xyz"));
        assert!(msg.contains("Valid countries"));
    }

    #[test]
    fn test_country_serde() {
        let country = Country::Br;
        let json = serde_json::to_string(&country).unwrap();
        assert_eq!(json, "\"br\"");

        let parsed: Country = serde_json::from_str("\"mx\"").unwrap();
        assert_eq!(parsed, Country::Mx);
    }
}
