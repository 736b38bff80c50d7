//! Body mass index categories.

/// Right-inclusive upper bounds and labels of the BMI categories.
/// The first category starts above zero.
pub const BMI_GROUPS: [(f64, &str); 6] = [
    (18.5, "1-Underweight"),
    (25.0, "2-Normal"),
    (30.0, "3-Overweight"),
    (35.0, "4-Obese Class I"),
    (40.0, "5-Obese Class II"),
    (100.0, "6-Obese Class III"),
];

/// Upper bound above which a computed BMI is treated as a measurement error.
pub const MAX_PLAUSIBLE_BMI: f64 = 100.0;

/// Maps a BMI value onto its category label, or `None` outside (0, 100].
pub fn bmi_group(bmi: f64) -> Option<&'static str> {
    if bmi.is_nan() || bmi <= 0.0 {
        return None;
    }
    BMI_GROUPS
        .iter()
        .find(|(upper, _)| bmi <= *upper)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_are_right_inclusive() {
        assert_eq!(bmi_group(18.5), Some("1-Underweight"));
        assert_eq!(bmi_group(18.51), Some("2-Normal"));
        assert_eq!(bmi_group(40.0), Some("5-Obese Class II"));
        assert_eq!(bmi_group(100.0), Some("6-Obese Class III"));
    }

    #[test]
    fn out_of_range_has_no_group() {
        assert_eq!(bmi_group(0.0), None);
        assert_eq!(bmi_group(-3.0), None);
        assert_eq!(bmi_group(100.5), None);
        assert_eq!(bmi_group(f64::NAN), None);
    }
}
