use std::fmt;
use std::str::FromStr;

use crate::error::{PostcodeError, Result};

/// A two-byte country identifier, uppercased.
///
/// Only the length is checked: `"zz"` is accepted even though GeoNames has no
/// such export. See <https://download.geonames.org/export/zip/> for the list
/// of available countries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryCode(String);

impl CountryCode {
    /// Normalize user input into a country code.
    ///
    /// Fails with [`PostcodeError::InvalidCountryCode`] when the input is not
    /// exactly two bytes long. The error reports the input as given.
    ///
    /// Uppercasing maps each character on its own. A character whose
    /// uppercase form is several characters, such as `ß`, is kept as is, so
    /// the code never grows past the length that was checked.
    pub fn normalize(input: &str) -> Result<Self> {
        if input.len() != 2 {
            return Err(PostcodeError::InvalidCountryCode {
                code: input.to_string(),
                len: input.len(),
            });
        }
        Ok(Self(input.chars().map(simple_uppercase).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the archive on the download server, e.g. `DE.zip`.
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.0)
    }

    /// Name of the data file inside the archive, e.g. `DE.txt`.
    pub fn member_name(&self) -> String {
        format!("{}.txt", self.0)
    }
}

fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

impl FromStr for CountryCode {
    type Err = PostcodeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::normalize(s)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_input() {
        let cc = CountryCode::normalize("de").unwrap();
        assert_eq!(cc.as_str(), "DE");
        assert_eq!(cc.archive_name(), "DE.zip");
        assert_eq!(cc.member_name(), "DE.txt");
    }

    #[test]
    fn accepts_any_two_bytes() {
        assert_eq!(CountryCode::normalize("zz").unwrap().as_str(), "ZZ");
        assert_eq!(CountryCode::normalize("1-").unwrap().as_str(), "1-");
    }

    #[test]
    fn rejects_wrong_length() {
        for input in ["", "d", "deu", "germany"] {
            match CountryCode::normalize(input) {
                Err(PostcodeError::InvalidCountryCode { code, len }) => {
                    assert_eq!(code, input);
                    assert_eq!(len, input.len());
                }
                other => panic!("normalize({input:?}) = {other:?}"),
            }
        }
    }

    #[test]
    fn length_is_counted_in_bytes() {
        // One character, two bytes.
        assert!(CountryCode::normalize("é").is_ok());
        // Two characters, four bytes.
        let err = CountryCode::normalize("üü").unwrap_err();
        assert!(matches!(err, PostcodeError::InvalidCountryCode { len: 4, .. }));
        assert_eq!(err.to_string(), "country code \"üü\" has 4 bytes, want 2");
    }

    #[test]
    fn multi_char_uppercase_is_left_alone() {
        let cc = CountryCode::normalize("ß").unwrap();
        assert_eq!(cc.as_str(), "ß");
        assert_eq!(cc.member_name(), "ß.txt");
        assert_eq!(CountryCode::normalize("é").unwrap().as_str(), "É");
    }

    #[test]
    fn parses_from_str() {
        let cc: CountryCode = "us".parse().unwrap();
        assert_eq!(cc.to_string(), "US");
    }
}
