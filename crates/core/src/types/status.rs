//! Status enums for bookings and payments.

use serde::{Deserialize, Serialize};

/// Booking lifecycle status.
///
/// Matches the backend's wire values (`"pending"`, `"in-progress"`, ...).
/// Transitions are owned by the backend; the web tier only displays the
/// current value and offers the actions each role is allowed to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    /// Booked, awaiting mechanic assignment.
    #[default]
    Pending,
    /// A mechanic has started the service.
    InProgress,
    /// Service finished and signed off by the mechanic.
    Completed,
    /// Cancelled by the customer or removed by an administrator.
    Canceled,
}

impl BookingStatus {
    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Canceled => "Canceled",
        }
    }

    /// Whether a customer may still cancel the booking.
    #[must_use]
    pub const fn cancellable(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the booking is waiting for a mechanic to start.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether a mechanic is currently on the job.
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Payment method selected at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Redirect-based wallet checkout through the payment gateway.
    #[default]
    Khalti,
    /// Pay the mechanic in cash when the service is done.
    CashOnService,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Khalti => write!(f, "Khalti"),
            Self::CashOnService => write!(f, "Cash on service"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        let status: BookingStatus = serde_json::from_str("\"canceled\"").unwrap();
        assert_eq!(status, BookingStatus::Canceled);
    }

    #[test]
    fn test_only_pending_is_cancellable() {
        assert!(BookingStatus::Pending.cancellable());
        assert!(!BookingStatus::InProgress.cancellable());
        assert!(!BookingStatus::Completed.cancellable());
        assert!(!BookingStatus::Canceled.cancellable());
    }
}
