//! Record encoding and decoding.
//!
//! Record format:
//! - seven signed decimal integers separated by `,`
//! - terminated by a single `:` (no newline)
//! - button fields are `0` or `1`

use core::fmt::{self, Write};
use core::str::FromStr;

use heapless::String;

/// Record terminator
pub const RECORD_TERMINATOR: u8 = b':';

/// Number of comma separated fields in a record
pub const FIELD_COUNT: usize = 7;

/// Maximum encoded record length
///
/// Seven `i32::MIN` values (11 chars each) plus separators fit in 84 bytes.
pub const MAX_RECORD_LEN: usize = 96;

/// Numeric record fields, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    AccelX,
    AccelY,
    MagNs,
    MagWe,
    Heading,
}

impl Field {
    const NUMERIC: [Field; 5] = [
        Field::AccelX,
        Field::AccelY,
        Field::MagNs,
        Field::MagWe,
        Field::Heading,
    ];

    /// Short name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Field::AccelX => "X",
            Field::AccelY => "Y",
            Field::MagNs => "NS",
            Field::MagWe => "WE",
            Field::Heading => "H",
        }
    }
}

/// Errors that can occur while encoding or parsing a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// Output buffer cannot hold the encoded record
    BufferTooSmall,
    /// Record does not have exactly seven fields
    FieldCount(usize),
    /// A numeric field is not a valid integer
    InvalidNumber(Field),
}

/// One smoothed sample as streamed over the serial link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report {
    /// Accelerometer X in milli-g
    pub accel_x: i32,
    /// Accelerometer Y in milli-g
    pub accel_y: i32,
    /// Magnetometer X (north/south) in nanotesla
    pub mag_ns: i32,
    /// Magnetometer Y (west/east) in nanotesla
    pub mag_we: i32,
    /// Compass heading in degrees
    pub heading: i32,
    /// Button A pressed
    pub button_a: bool,
    /// Button B pressed
    pub button_b: bool,
}

impl Report {
    /// Encode this record into a fixed-capacity string
    pub fn encode(&self) -> Result<String<MAX_RECORD_LEN>, ReportError> {
        let mut out = String::new();
        write!(out, "{}", self).map_err(|_| ReportError::BufferTooSmall)?;
        Ok(out)
    }

    /// Encode this record into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<usize, ReportError> {
        let encoded = self.encode()?;
        let bytes = encoded.as_bytes();
        if buffer.len() < bytes.len() {
            return Err(ReportError::BufferTooSmall);
        }
        buffer[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    /// Parse a received record
    ///
    /// Surrounding whitespace and a single trailing terminator are ignored.
    /// Trailing empty fields are dropped before counting, so `0,0,0,0,0,1,`
    /// has six fields. Numeric fields may carry whitespace around the digits.
    /// A button field counts as pressed when its text starts with `1`.
    pub fn parse(data: &str) -> Result<Self, ReportError> {
        let data = data.trim();
        let data = data.strip_suffix(RECORD_TERMINATOR as char).unwrap_or(data);
        let data = data.trim_end_matches(',');

        let count = data.split(',').count();
        if count != FIELD_COUNT {
            return Err(ReportError::FieldCount(count));
        }

        let mut fields = data.split(',');
        let mut numbers = [0i32; 5];
        for (slot, field) in numbers.iter_mut().zip(Field::NUMERIC) {
            let text = fields.next().ok_or(ReportError::FieldCount(count))?;
            *slot = i32::from_str(text.trim()).map_err(|_| ReportError::InvalidNumber(field))?;
        }

        let button_a = parse_button(fields.next().ok_or(ReportError::FieldCount(count))?);
        let button_b = parse_button(fields.next().ok_or(ReportError::FieldCount(count))?);

        Ok(Self {
            accel_x: numbers[0],
            accel_y: numbers[1],
            mag_ns: numbers[2],
            mag_we: numbers[3],
            heading: numbers[4],
            button_a,
            button_b,
        })
    }
}

impl FromStr for Report {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Report::parse(s)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{}:",
            self.accel_x,
            self.accel_y,
            self.mag_ns,
            self.mag_we,
            self.heading,
            self.button_a as u8,
            self.button_b as u8,
        )
    }
}

fn parse_button(text: &str) -> bool {
    text.trim().starts_with('1')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Report {
        Report {
            accel_x: -112,
            accel_y: 36,
            mag_ns: -2850,
            mag_we: 14250,
            heading: 187,
            button_a: false,
            button_b: true,
        }
    }

    #[test]
    fn test_encode_format() {
        let encoded = sample().encode().unwrap();
        assert_eq!(encoded.as_str(), "-112,36,-2850,14250,187,0,1:");
    }

    #[test]
    fn test_encode_into_small_buffer() {
        let mut buffer = [0u8; 8];
        assert_eq!(
            sample().encode_into(&mut buffer),
            Err(ReportError::BufferTooSmall)
        );

        let mut buffer = [0u8; MAX_RECORD_LEN];
        let len = sample().encode_into(&mut buffer).unwrap();
        assert_eq!(&buffer[..len], b"-112,36,-2850,14250,187,0,1:");
    }

    #[test]
    fn test_parse_with_and_without_terminator() {
        assert_eq!(Report::parse("-112,36,-2850,14250,187,0,1:"), Ok(sample()));
        assert_eq!(Report::parse("-112,36,-2850,14250,187,0,1"), Ok(sample()));
        assert_eq!(
            Report::parse("  -112, 36 ,-2850,14250, 187 ,0,1\r\n"),
            Ok(sample())
        );
    }

    #[test]
    fn test_parse_wrong_field_count() {
        assert_eq!(
            Report::parse("1,2,3,4,5,0"),
            Err(ReportError::FieldCount(6))
        );
        assert_eq!(
            Report::parse("1,2,3,4,5,0,1,9"),
            Err(ReportError::FieldCount(8))
        );
        assert_eq!(Report::parse(""), Err(ReportError::FieldCount(1)));
    }

    #[test]
    fn test_parse_drops_trailing_empty_fields() {
        assert_eq!(
            Report::parse("0,0,0,0,0,1,"),
            Err(ReportError::FieldCount(6))
        );
        assert_eq!(
            Report::parse("0,0,0,0,0,1,,:"),
            Err(ReportError::FieldCount(6))
        );
        assert_eq!(
            Report::parse("1,2,3,4,5,0,1,,"),
            Ok(Report {
                accel_x: 1,
                accel_y: 2,
                mag_ns: 3,
                mag_we: 4,
                heading: 5,
                button_a: false,
                button_b: true,
            })
        );
    }

    #[test]
    fn test_parse_invalid_number_names_field() {
        assert_eq!(
            Report::parse("1,2,x3,4,5,0,0"),
            Err(ReportError::InvalidNumber(Field::MagNs))
        );
        assert_eq!(
            Report::parse("1,2,3,4,,0,0"),
            Err(ReportError::InvalidNumber(Field::Heading))
        );
        assert_eq!(Field::MagNs.name(), "NS");
    }

    #[test]
    fn test_button_fields_are_lenient() {
        let report = Report::parse("0,0,0,0,0,1x, 10").unwrap();
        assert!(report.button_a);
        assert!(report.button_b);

        let report = Report::parse("0,0,0,0,0,,yes").unwrap();
        assert!(!report.button_a);
        assert!(!report.button_b);
    }

    #[test]
    fn test_extreme_values_fit() {
        let report = Report {
            accel_x: i32::MIN,
            accel_y: i32::MIN,
            mag_ns: i32::MIN,
            mag_we: i32::MIN,
            heading: i32::MIN,
            button_a: true,
            button_b: true,
        };
        let encoded = report.encode().unwrap();
        assert!(encoded.len() <= MAX_RECORD_LEN);
        assert_eq!(encoded.parse::<Report>(), Ok(report));
    }

    proptest! {
        #[test]
        fn prop_encoded_record_is_well_formed(
            accel_x in any::<i32>(),
            accel_y in any::<i32>(),
            mag_ns in any::<i32>(),
            mag_we in any::<i32>(),
            heading in 0i32..360,
            button_a in any::<bool>(),
            button_b in any::<bool>(),
        ) {
            let report = Report { accel_x, accel_y, mag_ns, mag_we, heading, button_a, button_b };
            let encoded = report.encode().unwrap();

            prop_assert!(encoded.ends_with(':'));
            prop_assert_eq!(encoded.matches(':').count(), 1);
            prop_assert_eq!(encoded.split(',').count(), FIELD_COUNT);
            prop_assert_eq!(Report::parse(&encoded), Ok(report));
        }
    }
}
