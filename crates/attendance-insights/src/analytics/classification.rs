use super::round2;
use crate::dataset::AttendanceHours;
use serde::{Serialize, Serializer};

pub const REQUIRED_OFFICE_HOURS: f64 = 8.45;
pub const REQUIRED_BAY_HOURS: f64 = 7.0;
pub const MINIMUM_BAY_HOURS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    PunctualAndCompliant,
    BayTimeDeficient,
    OfficeTimeDeficient,
    CriticallyDeficient,
}

impl Classification {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PunctualAndCompliant => "Punctual & Compliant",
            Self::BayTimeDeficient => "Bay-Time Deficient",
            Self::OfficeTimeDeficient => "Office-Time Deficient",
            Self::CriticallyDeficient => "Critically Deficient",
        }
    }

    pub const fn recommended_action(self) -> &'static str {
        match self {
            Self::PunctualAndCompliant => {
                "Acknowledge & Retain: Send a positive note and consider for high-priority roles."
            }
            Self::BayTimeDeficient => {
                "Focused Discussion: Discuss non-work distractions and monitor Over-Break ratio."
            }
            Self::OfficeTimeDeficient => {
                "Focused Discussion: Time management coaching and 30-day monitoring period."
            }
            Self::CriticallyDeficient => {
                "Formal Review: Escalate to manager & HR for potential role change or transition."
            }
        }
    }

    /// Decision table over the recomputed office total and bay hours.
    pub fn from_hours(office_hours: f64, bay_hours: f64) -> Self {
        let office_met = office_hours >= REQUIRED_OFFICE_HOURS;
        let bay_met = bay_hours >= REQUIRED_BAY_HOURS;

        match (office_met, bay_met) {
            (true, true) => Self::PunctualAndCompliant,
            (true, false) => Self::BayTimeDeficient,
            (false, _) if bay_hours >= MINIMUM_BAY_HOURS => Self::OfficeTimeDeficient,
            (false, _) => Self::CriticallyDeficient,
        }
    }
}

impl Serialize for Classification {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub classification: Classification,
    pub recommended_action: &'static str,
    pub justification: String,
}

/// Classifies compliance from bay and break time.
///
/// The office figure used here is `bay + break` after rounding both to two
/// decimals; the recorded office average is not consulted.
pub fn classify(hours: &AttendanceHours) -> ClassificationResult {
    let bay_hours = round2(hours.bay_hours());
    let break_hours = round2(hours.break_hours());
    let office_hours = bay_hours + break_hours;
    let over_break_ratio = if office_hours > 0.0 {
        break_hours / office_hours
    } else {
        0.0
    };

    let classification = Classification::from_hours(office_hours, bay_hours);
    let ratio_pct = over_break_ratio * 100.0;
    let justification = if bay_hours < REQUIRED_BAY_HOURS {
        let percent_below = (REQUIRED_BAY_HOURS - bay_hours) / REQUIRED_BAY_HOURS * 100.0;
        format!(
            "Employee's Average Bay Hours ({bay_hours:.2}) are {percent_below:.1}% below the required 7 hours, and the Over-Break Ratio is {ratio_pct:.1}% (benchmark: ≤20%)."
        )
    } else {
        format!(
            "Employee's Average Bay Hours ({bay_hours:.2}) meet or exceed the required 7 hours, and the Over-Break Ratio is {ratio_pct:.1}% (benchmark: ≤20%)."
        )
    };

    ClassificationResult {
        classification,
        recommended_action: classification.recommended_action(),
        justification,
    }
}
