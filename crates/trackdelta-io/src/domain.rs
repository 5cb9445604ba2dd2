//! Domain types for trackdelta-io.

use std::fmt;
use std::str::FromStr;

use crate::IoError;

/// A driver abbreviation such as `VER` or `HAM`.
///
/// Validated as non-empty ASCII alphanumeric and stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverCode(String);

impl DriverCode {
    /// Parse and normalise a driver code.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidDriverCode`] if the trimmed code is empty or
    /// contains characters outside `[A-Za-z0-9]`.
    pub fn new(code: &str) -> Result<Self, IoError> {
        let trimmed = code.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(IoError::InvalidDriverCode {
                code: code.to_string(),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Return the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriverCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session type within an event weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionCode {
    /// Grand Prix.
    #[default]
    Race,
    /// Qualifying.
    Qualifying,
    /// Sprint.
    Sprint,
    /// Sprint qualifying / shootout.
    SprintQualifying,
    /// Free practice 1.
    Practice1,
    /// Free practice 2.
    Practice2,
    /// Free practice 3.
    Practice3,
}

impl SessionCode {
    /// Return the short code used by the timing provider (`R`, `Q`, `FP1`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SessionCode::Race => "R",
            SessionCode::Qualifying => "Q",
            SessionCode::Sprint => "S",
            SessionCode::SprintQualifying => "SQ",
            SessionCode::Practice1 => "FP1",
            SessionCode::Practice2 => "FP2",
            SessionCode::Practice3 => "FP3",
        }
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionCode {
    type Err = IoError;

    /// Parse a session code case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "R" => Ok(SessionCode::Race),
            "Q" => Ok(SessionCode::Qualifying),
            "S" => Ok(SessionCode::Sprint),
            "SQ" => Ok(SessionCode::SprintQualifying),
            "FP1" => Ok(SessionCode::Practice1),
            "FP2" => Ok(SessionCode::Practice2),
            "FP3" => Ok(SessionCode::Practice3),
            _ => Err(IoError::InvalidSessionCode { code: s.to_string() }),
        }
    }
}

/// Identifies one session: season, event and session type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    /// Championship year.
    pub year: u16,
    /// Event name as given by the user, e.g. `Monza` or `Abu Dhabi`.
    pub event: String,
    /// Session type.
    pub session: SessionCode,
}

impl SessionKey {
    /// Directory name inside a session store, e.g. `2021_abu_dhabi_R`.
    #[must_use]
    pub fn dir_name(&self) -> String {
        let slug: String = self
            .event
            .trim()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        format!("{}_{}_{}", self.year, slug, self.session)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.year, self.event, self.session)
    }
}

/// A validated report name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportName(String);

impl ReportName {
    /// Parse and validate a report name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidReportName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidReportName { name });
        }
        Ok(Self(name))
    }

    /// Return the report name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_code_normalises_case() {
        assert_eq!(DriverCode::new(" ver ").unwrap().as_str(), "VER");
    }

    #[test]
    fn driver_code_rejects_bad_input() {
        assert!(matches!(DriverCode::new(""), Err(IoError::InvalidDriverCode { .. })));
        assert!(matches!(DriverCode::new("V-R"), Err(IoError::InvalidDriverCode { .. })));
    }

    #[test]
    fn session_code_parses_case_insensitively() {
        assert_eq!("fp2".parse::<SessionCode>().unwrap(), SessionCode::Practice2);
        assert_eq!("r".parse::<SessionCode>().unwrap(), SessionCode::Race);
        assert!(matches!("FP4".parse::<SessionCode>(), Err(IoError::InvalidSessionCode { .. })));
    }

    #[test]
    fn session_key_dir_name() {
        let key = SessionKey {
            year: 2021,
            event: "Abu Dhabi".to_string(),
            session: SessionCode::Qualifying,
        };
        assert_eq!(key.dir_name(), "2021_abu_dhabi_Q");
    }

    #[test]
    fn report_name_valid() {
        assert_eq!(ReportName::new("monza-2021_R".to_string()).unwrap().as_str(), "monza-2021_R");
    }

    #[test]
    fn report_name_rejects_special_chars() {
        assert!(matches!(
            ReportName::new("my report!".to_string()),
            Err(IoError::InvalidReportName { .. })
        ));
        assert!(matches!(ReportName::new(String::new()), Err(IoError::InvalidReportName { .. })));
    }
}
