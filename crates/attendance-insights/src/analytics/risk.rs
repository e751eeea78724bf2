use crate::dataset::AttendanceHours;
use serde::{Serialize, Serializer};

const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLabel {
    Low,
    Medium,
    High,
    Unknown,
}

impl RiskLabel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unknown => "Unknown",
        }
    }

    fn from_score(score: u8) -> Self {
        if score >= 60 {
            Self::High
        } else if score >= 30 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl Serialize for RiskLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// Attendance risk with the ordered reasons that produced the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub label: RiskLabel,
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Scores office time, break time and the bay-to-office ratio.
///
/// Each of the three checks contributes at most once, in that order. Zero
/// office hours short-circuits to the maximal `Unknown` result.
pub fn assess_risk(hours: &AttendanceHours) -> RiskAssessment {
    let office_hours = hours.office_hours();
    let bay_hours = hours.bay_hours();
    let break_hours = hours.break_hours();

    if office_hours == 0.0 {
        return RiskAssessment {
            label: RiskLabel::Unknown,
            score: MAX_SCORE,
            reasons: vec!["No office hours recorded.".to_string()],
        };
    }

    let bay_ratio = bay_hours / office_hours;
    let mut score: u8 = 0;
    let mut reasons = Vec::new();

    if office_hours < 6.0 {
        score += 50;
        reasons.push(format!("Office hours too low ({office_hours:.1}h < 6h)."));
    } else if office_hours < 8.0 {
        score += 25;
        reasons.push(format!(
            "Office hours slightly low ({office_hours:.1}h < 8h)."
        ));
    }

    if break_hours > 1.5 {
        score += 30;
        reasons.push(format!("Break hours high ({break_hours:.1}h > 1.5h)."));
    } else if break_hours > 1.0 {
        score += 15;
        reasons.push(format!(
            "Break hours slightly high ({break_hours:.1}h > 1h)."
        ));
    }

    if bay_ratio < 0.6 {
        score += 40;
        reasons.push(format!("Bay ratio low ({bay_ratio:.2} < 0.60)."));
    } else if bay_ratio < 0.75 {
        score += 20;
        reasons.push(format!("Bay ratio slightly low ({bay_ratio:.2} < 0.75)."));
    }

    let score = score.min(MAX_SCORE);
    if reasons.is_empty() {
        reasons.push("No major issues detected.".to_string());
    }

    RiskAssessment {
        label: RiskLabel::from_score(score),
        score,
        reasons,
    }
}
