use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RefundStatus {
    #[default]
    #[serde(rename = "Not_Required")]
    NotRequired,
    Pending,
    Processing,
    Completed,
    Failed,
}

impl RefundStatus {
    pub const ALL: [RefundStatus; 5] = [
        RefundStatus::NotRequired,
        RefundStatus::Pending,
        RefundStatus::Processing,
        RefundStatus::Completed,
        RefundStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStatus::NotRequired => "Not_Required",
            RefundStatus::Pending => "Pending",
            RefundStatus::Processing => "Processing",
            RefundStatus::Completed => "Completed",
            RefundStatus::Failed => "Failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Not_Required" => Some(RefundStatus::NotRequired),
            "Pending" => Some(RefundStatus::Pending),
            "Processing" => Some(RefundStatus::Processing),
            "Completed" => Some(RefundStatus::Completed),
            "Failed" => Some(RefundStatus::Failed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RefundStatus::NotRequired => "Not Required",
            RefundStatus::Pending => "Refund Pending",
            RefundStatus::Processing => "Refund Processing",
            RefundStatus::Completed => "Refund Completed",
            RefundStatus::Failed => "Refund Failed",
        }
    }
}

impl Display for RefundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_not_required() {
        assert_eq!(RefundStatus::default(), RefundStatus::NotRequired);
        assert_eq!(RefundStatus::default().as_str(), "Not_Required");
    }

    #[test]
    fn every_variant_parses_back() {
        for status in RefundStatus::ALL {
            assert_eq!(RefundStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RefundStatus::parse("Refund Pending"), None);
    }
}
