use std::ops::Index;

/// Number of columns in a GeoNames postal code export.
pub const FIELD_COUNT: usize = 12;

/// Column of a postal code [`Entry`], in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// ISO country code, 2 characters.
    CountryCode,
    PostalCode,
    PlaceName,
    /// First-level administrative division name (state).
    AdminName1,
    AdminCode1,
    /// Second-level administrative division name (county/province).
    AdminName2,
    AdminCode2,
    /// Third-level administrative division name (community).
    AdminName3,
    AdminCode3,
    /// Estimated latitude (WGS84).
    Latitude,
    /// Estimated longitude (WGS84).
    Longitude,
    /// Accuracy of lat/lng from 1=estimated, 4=geonameid, 6=centroid of addresses or shape.
    Accuracy,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::CountryCode,
        Field::PostalCode,
        Field::PlaceName,
        Field::AdminName1,
        Field::AdminCode1,
        Field::AdminName2,
        Field::AdminCode2,
        Field::AdminName3,
        Field::AdminCode3,
        Field::Latitude,
        Field::Longitude,
        Field::Accuracy,
    ];

    /// Column position within a record.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name as used in the GeoNames readme.
    pub fn name(self) -> &'static str {
        match self {
            Field::CountryCode => "country code",
            Field::PostalCode => "postal code",
            Field::PlaceName => "place name",
            Field::AdminName1 => "admin name1",
            Field::AdminCode1 => "admin code1",
            Field::AdminName2 => "admin name2",
            Field::AdminCode2 => "admin code2",
            Field::AdminName3 => "admin name3",
            Field::AdminCode3 => "admin code3",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Accuracy => "accuracy",
        }
    }
}

/// A single postal code record: exactly twelve text columns.
///
/// Values are kept as they appear in the file. Numeric columns are not
/// parsed and a missing value is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Entry([String; FIELD_COUNT]);

impl Entry {
    /// Build an entry from a row of any width.
    ///
    /// Columns are assigned by position. Short rows leave the trailing
    /// fields empty and columns past the twelfth are dropped.
    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entry = Entry::default();
        for (slot, value) in entry.0.iter_mut().zip(columns) {
            *slot = value.into();
        }
        entry
    }

    pub fn get(&self, field: Field) -> &str {
        &self.0[field.index()]
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.0[field.index()] = value.into();
    }

    pub fn fields(&self) -> &[String; FIELD_COUNT] {
        &self.0
    }

    /// Join the fields with tabs, the inverse of parsing an unquoted line.
    pub fn to_line(&self) -> String {
        self.0.join("\t")
    }
}

impl Index<Field> for Entry {
    type Output = str;

    fn index(&self, field: Field) -> &str {
        &self.0[field.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_matches_columns() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
        assert_eq!(Field::Accuracy.index(), FIELD_COUNT - 1);
    }

    #[test]
    fn short_rows_are_padded() {
        let entry = Entry::from_columns(["DE", "54668"]);
        assert_eq!(&entry[Field::CountryCode], "DE");
        assert_eq!(&entry[Field::PostalCode], "54668");
        assert_eq!(&entry[Field::PlaceName], "");
        assert_eq!(entry.get(Field::Accuracy), "");
    }

    #[test]
    fn long_rows_are_truncated() {
        let columns: Vec<String> = (0..15).map(|i| i.to_string()).collect();
        let entry = Entry::from_columns(columns);
        assert_eq!(entry.get(Field::Accuracy), "11");
        assert_eq!(entry.fields().len(), FIELD_COUNT);
    }

    #[test]
    fn to_line_joins_with_tabs() {
        let entry = Entry::from_columns(["a", "b", "c"]);
        assert_eq!(entry.to_line(), "a\tb\tc\t\t\t\t\t\t\t\t\t");
    }
}
