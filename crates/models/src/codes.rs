use serde::Serialize;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Custom error type for parsing requester identifiers and course codes
#[derive(Debug, Clone, PartialEq)]
pub enum ParseCodeError {
    EmptyInput,
    InvalidFormat,
}

impl Display for ParseCodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EmptyInput => write!(f, "Empty input string"),
            Self::InvalidFormat => write!(f, "Invalid format"),
        }
    }
}

/// A student enrollment number, `A` followed by digits (e.g. "A123")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentNumber(String);

impl EnrollmentNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EnrollmentNumber {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseCodeError::EmptyInput);
        }

        let digits = s.strip_prefix('A').ok_or(ParseCodeError::InvalidFormat)?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseCodeError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }
}

impl Display for EnrollmentNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A short subject or faculty code, letters followed by digits (e.g. "CS101")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseCode(String);

impl CourseCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CourseCode {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseCodeError::EmptyInput);
        }

        // Letters up to the first digit, digits to the end, nothing else
        let digits_at = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or(ParseCodeError::InvalidFormat)?;
        let (letters, digits) = s.split_at(digits_at);

        if letters.is_empty()
            || !letters.chars().all(|c| c.is_ascii_alphabetic())
            || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ParseCodeError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }
}

impl Display for CourseCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A code list whose length does not match the number of covered periods
#[derive(Debug, Clone, PartialEq)]
pub struct CodeListError {
    pub expected: usize,
    pub found: usize,
}

impl Display for CodeListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "expected {} codes separated by spaces, found {}",
            self.expected, self.found
        )
    }
}

/// Splits a whitespace-separated code list into one token per covered period.
///
/// A single-period request bypasses the split entirely: the whole trimmed
/// input is passed through as one code.
pub fn split_codes(input: &str, expected: usize) -> Result<Vec<String>, CodeListError> {
    if expected <= 1 {
        return Ok(vec![input.trim().to_owned()]);
    }

    let tokens: Vec<String> = input.split_whitespace().map(str::to_owned).collect();
    if tokens.len() != expected {
        return Err(CodeListError {
            expected,
            found: tokens.len(),
        });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_number_shape() {
        assert!("A123".parse::<EnrollmentNumber>().is_ok());
        assert!("A1".parse::<EnrollmentNumber>().is_ok());

        assert!("B123".parse::<EnrollmentNumber>().is_err());
        assert!("A12B".parse::<EnrollmentNumber>().is_err());
        assert!("A".parse::<EnrollmentNumber>().is_err());
        assert!("".parse::<EnrollmentNumber>().is_err());
    }

    #[test]
    fn test_course_code_shape() {
        assert!("CS101".parse::<CourseCode>().is_ok());
        assert!("math12".parse::<CourseCode>().is_ok());

        assert!("101CS".parse::<CourseCode>().is_err());
        assert!("CS".parse::<CourseCode>().is_err());
        assert!("CS1A1".parse::<CourseCode>().is_err());
        assert!("".parse::<CourseCode>().is_err());
    }

    #[test]
    fn test_split_codes_matches_expected_count() {
        assert_eq!(
            split_codes("CS101 CS102", 2),
            Ok(vec!["CS101".to_owned(), "CS102".to_owned()])
        );

        assert_eq!(
            split_codes("CS101", 2),
            Err(CodeListError {
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_split_codes_single_period_passes_through() {
        assert_eq!(split_codes(" CS101 ", 1), Ok(vec!["CS101".to_owned()]));
        // With one period the input is never tokenized
        assert_eq!(split_codes("CS101 CS102", 1), Ok(vec!["CS101 CS102".to_owned()]));
    }
}
