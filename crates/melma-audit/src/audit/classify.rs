use serde::Serialize;

/// Composite floor for the acceptable tier.
pub const ACCEPTABLE_COMPOSITE_FLOOR: f64 = 80.0;
/// Floor both the accuracy and reasoning domains must clear for the
/// acceptable tier.
pub const ACCEPTABLE_DOMAIN_FLOOR: f64 = 75.0;
/// Composite floor for the conditional tier.
pub const CONDITIONAL_COMPOSITE_FLOOR: f64 = 60.0;

/// Clinical-acceptability outcome of one audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationTier {
    Acceptable,
    Conditional,
    Unacceptable,
}

impl ClassificationTier {
    pub fn code(self) -> &'static str {
        match self {
            ClassificationTier::Acceptable => "CLASS I",
            ClassificationTier::Conditional => "CLASS II",
            ClassificationTier::Unacceptable => "CLASS III",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClassificationTier::Acceptable => "Clinically Acceptable",
            ClassificationTier::Conditional => "Conditionally Acceptable",
            ClassificationTier::Unacceptable => "Clinically Unacceptable",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ClassificationTier::Acceptable => "#10b981",
            ClassificationTier::Conditional => "#f59e0b",
            ClassificationTier::Unacceptable => "#ef4444",
        }
    }
}

/// Select the tier for one audit. The safety gate is absolute: no numeric
/// score overrides a tripped flag. Below it, thresholds are evaluated in
/// order with first match winning.
pub fn classify(
    safety_flag: bool,
    composite: f64,
    accuracy_pct: f64,
    reasoning_pct: f64,
) -> ClassificationTier {
    if safety_flag {
        return ClassificationTier::Unacceptable;
    }

    if composite >= ACCEPTABLE_COMPOSITE_FLOOR
        && accuracy_pct >= ACCEPTABLE_DOMAIN_FLOOR
        && reasoning_pct >= ACCEPTABLE_DOMAIN_FLOOR
    {
        return ClassificationTier::Acceptable;
    }

    if composite >= CONDITIONAL_COMPOSITE_FLOOR {
        return ClassificationTier::Conditional;
    }

    ClassificationTier::Unacceptable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_flag_overrides_perfect_scores() {
        assert_eq!(
            classify(true, 100.0, 100.0, 100.0),
            ClassificationTier::Unacceptable
        );
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(
            classify(false, 80.0, 75.0, 75.0),
            ClassificationTier::Acceptable
        );
        assert_eq!(
            classify(false, 60.0, 0.0, 0.0),
            ClassificationTier::Conditional
        );
    }

    #[test]
    fn weak_key_domain_demotes_to_conditional() {
        assert_eq!(
            classify(false, 85.0, 74.9, 90.0),
            ClassificationTier::Conditional
        );
        assert_eq!(
            classify(false, 85.0, 90.0, 74.9),
            ClassificationTier::Conditional
        );
    }

    #[test]
    fn low_composite_is_unacceptable() {
        assert_eq!(
            classify(false, 59.9, 90.0, 90.0),
            ClassificationTier::Unacceptable
        );
    }

    #[test]
    fn tier_is_monotonic_in_composite() {
        fn rank(tier: ClassificationTier) -> u8 {
            match tier {
                ClassificationTier::Unacceptable => 0,
                ClassificationTier::Conditional => 1,
                ClassificationTier::Acceptable => 2,
            }
        }

        let mut previous = 0;
        for step in 0..=1000 {
            let composite = f64::from(step) / 10.0;
            let current = rank(classify(false, composite, 90.0, 90.0));
            assert!(current >= previous, "tier demoted at composite {composite}");
            previous = current;
        }
    }

    #[test]
    fn tier_metadata_is_fixed() {
        assert_eq!(ClassificationTier::Acceptable.code(), "CLASS I");
        assert_eq!(ClassificationTier::Conditional.code(), "CLASS II");
        assert_eq!(ClassificationTier::Unacceptable.code(), "CLASS III");
        assert_eq!(ClassificationTier::Unacceptable.color(), "#ef4444");
        assert_eq!(
            ClassificationTier::Conditional.label(),
            "Conditionally Acceptable"
        );
    }
}
