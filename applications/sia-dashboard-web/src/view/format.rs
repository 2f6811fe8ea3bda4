/// Visual tier of a percentage-driven progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn for_percent(percent: f64) -> Self {
        let percent = clamp_percent(percent);
        if percent < 25.0 {
            Tier::Low
        } else if percent < 75.0 {
            Tier::Medium
        } else {
            Tier::High
        }
    }

    /// Class applied to the bar; the high tier uses the default styling
    pub fn class(&self) -> Option<&'static str> {
        match self {
            Tier::Low => Some("low"),
            Tier::Medium => Some("medium"),
            Tier::High => None,
        }
    }
}

/// Flow, rate, pressure, voltage, power and charge values
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// Percentages and tank level in millimetres, rounded half up
pub fn rounded(value: f64) -> String {
    let rounded = (value + 0.5).floor();
    // avoid "-0"
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{:.0}", rounded)
    }
}

pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Lowercased state value as a single class token; inner whitespace becomes `-`
pub fn state_class(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Valve display string. A set output (`true`) holds the valve closed.
pub fn valve_text(closed: bool) -> &'static str {
    if closed {
        "closed"
    } else {
        "opened"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_decimal() {
        assert_eq!(one_decimal(12.34), "12.3");
        assert_eq!(one_decimal(5.0), "5.0");
        assert_eq!(one_decimal(-1.26), "-1.3");
    }

    #[test]
    fn test_rounded() {
        assert_eq!(rounded(42.4), "42");
        assert_eq!(rounded(42.5), "43");
        assert_eq!(rounded(1234.7), "1235");
        assert_eq!(rounded(-0.2), "0");
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-10.0), 0.0);
        assert_eq!(clamp_percent(150.0), 100.0);
        assert_eq!(clamp_percent(55.5), 55.5);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_percent(-10.0), Tier::Low);
        assert_eq!(Tier::for_percent(24.9), Tier::Low);
        assert_eq!(Tier::for_percent(25.0), Tier::Medium);
        assert_eq!(Tier::for_percent(74.9), Tier::Medium);
        assert_eq!(Tier::for_percent(75.0), Tier::High);
        assert_eq!(Tier::for_percent(150.0), Tier::High);
        assert_eq!(Tier::High.class(), None);
        assert_eq!(Tier::Low.class(), Some("low"));
    }

    #[test]
    fn test_valve_text_is_inverted() {
        assert_eq!(valve_text(true), "closed");
        assert_eq!(valve_text(false), "opened");
    }

    #[test]
    fn test_state_class() {
        assert_eq!(state_class("Run"), "run");
        assert_eq!(state_class(" FAULT "), "fault");
    }

    #[test]
    fn test_state_class_is_one_token() {
        assert_eq!(state_class("Fault Stop"), "fault-stop");
        assert_eq!(state_class("  Manual \t Override "), "manual-override");
        assert_eq!(state_class(""), "");
    }
}
