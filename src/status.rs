//! Run Status Resolution
//!
//! Maps the CI run status keyword to a display label and embed accent color.
//! The keyword set is closed: `success`, `failure`, `cancelled`. Anything
//! else is a configuration error and aborts the run before any delivery.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

/// Display options for a resolved status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOption {
    pub label: &'static str,
    pub color: u32,
}

/// CI run outcome, as reported by the workflow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
    Cancelled,
}

impl Status {
    /// Resolve a status keyword, case-insensitively.
    ///
    /// Returns `InvalidStatus` for anything outside the fixed set.
    pub fn resolve(keyword: &str) -> Result<Self, NotifyError> {
        match keyword.to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "failure" => Ok(Self::Failure),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(NotifyError::InvalidStatus(keyword.to_string())),
        }
    }

    /// Display label and accent color for this status.
    pub fn options(&self) -> StatusOption {
        match self {
            Self::Success => StatusOption {
                label: "Success",
                color: 0x28A745,
            },
            Self::Failure => StatusOption {
                label: "Failure",
                color: 0xCB2431,
            },
            Self::Cancelled => StatusOption {
                label: "Cancelled",
                color: 0xDBAB09,
            },
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.options().label)
    }
}
