// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for school staff running the filter.
//
// Every technical error maps to a plain summary plus a suggestion. The
// severity decides whether the caller should offer the same file again.

use crate::error::AbsenteeError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user must do something first (pick another file, fix a setting).
    ActionRequired,
    /// The file itself cannot be processed; retrying will not help.
    Permanent,
    /// A defect in the calling program, not in the user's input.
    Internal,
}

/// A human-readable error with a plain summary and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the user should try next.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert an `AbsenteeError` into a `HumanError`.
pub fn humanize_error(err: &AbsenteeError) -> HumanError {
    match err {
        AbsenteeError::DocumentRead(detail) => {
            if detail.to_ascii_lowercase().contains("encrypt") {
                HumanError {
                    message: "This PDF is password protected.".into(),
                    suggestion: "Export an unprotected copy of the attendance list and try again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "This file could not be read as a PDF.".into(),
                    suggestion: "Check that the file is the attendance list PDF and that it downloaded completely.".into(),
                    severity: Severity::Permanent,
                }
            }
        }

        AbsenteeError::PageRead { page, .. } => HumanError {
            message: format!("Page {} of the PDF could not be read.", page + 1),
            suggestion: "The PDF may be damaged. Try exporting the attendance list again.".into(),
            severity: Severity::Permanent,
        },

        AbsenteeError::InvalidIndex(detail) => HumanError {
            message: "The page selection did not match the document.".into(),
            suggestion: format!("This is a bug in the calling program. ({detail})"),
            severity: Severity::Internal,
        },

        AbsenteeError::Serialization(_) => HumanError {
            message: "The filtered PDF could not be created.".into(),
            suggestion: "Try again with a fresh copy of the attendance list.".into(),
            severity: Severity::Permanent,
        },

        AbsenteeError::Config(detail) => HumanError {
            message: "The filter settings are not valid.".into(),
            suggestion: format!("Fix the setting and run again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        AbsenteeError::Io(io) => match io.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file was not found.".into(),
                suggestion: "Check the file name and folder, then try again.".into(),
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied.".into(),
                suggestion: "Choose a folder you are allowed to write to, or ask for access.".into(),
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "A file could not be read or written.".into(),
                suggestion: format!("Check the disk and try again. ({io})"),
                severity: Severity::ActionRequired,
            },
        },

        AbsenteeError::Json(detail) => HumanError {
            message: "The settings file is not valid JSON.".into(),
            suggestion: format!("Fix the settings file and run again. ({detail})"),
            severity: Severity::ActionRequired,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_pdf_is_permanent() {
        let err = AbsenteeError::DocumentRead("invalid file header".into());
        assert_eq!(humanize_error(&err).severity, Severity::Permanent);
    }

    #[test]
    fn encrypted_pdf_needs_action() {
        let err = AbsenteeError::DocumentRead("document is Encrypted".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.message.contains("password"));
    }

    #[test]
    fn page_errors_use_one_based_numbers() {
        let err = AbsenteeError::PageRead {
            page: 0,
            cause: "bad operator".into(),
        };
        assert!(humanize_error(&err).message.contains("Page 1 "));
    }

    #[test]
    fn missing_file_needs_action() {
        let err = AbsenteeError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert_eq!(human.message, "The file was not found.");
    }

    #[test]
    fn bad_selection_is_internal() {
        let err = AbsenteeError::InvalidIndex("index 5 out of range".into());
        assert_eq!(humanize_error(&err).severity, Severity::Internal);
    }
}
