//! Indicator identifiers and logical LED state

use std::fmt;

/// One of the three indicator outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Pending,
    Cooking,
    Ready,
}

impl Indicator {
    /// All indicators, in pin order
    pub const ALL: [Indicator; 3] = [Indicator::Pending, Indicator::Cooking, Indicator::Ready];

    pub fn label(self) -> &'static str {
        match self {
            Indicator::Pending => "pending",
            Indicator::Cooking => "cooking",
            Indicator::Ready => "ready",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Logical on/off state of the three indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndicatorState {
    pub pending: bool,
    pub cooking: bool,
    pub ready: bool,
}

impl IndicatorState {
    /// Create a new IndicatorState with every LED off
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one indicator, returning whether the state changed
    pub fn set(&mut self, indicator: Indicator, on: bool) -> bool {
        let slot = match indicator {
            Indicator::Pending => &mut self.pending,
            Indicator::Cooking => &mut self.cooking,
            Indicator::Ready => &mut self.ready,
        };
        let changed = *slot != on;
        *slot = on;
        changed
    }

    /// Check if every indicator is off
    pub fn all_off(&self) -> bool {
        !(self.pending || self.cooking || self.ready)
    }
}

impl fmt::Display for IndicatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |on: bool| if on { "ON" } else { "off" };
        write!(
            f,
            "pending={} cooking={} ready={}",
            flag(self.pending),
            flag(self.cooking),
            flag(self.ready)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_changes() {
        let mut state = IndicatorState::new();
        assert!(state.all_off());
        assert!(state.set(Indicator::Cooking, true));
        assert!(!state.set(Indicator::Cooking, true));
        assert!(state.cooking);
        assert!(!state.pending);
        assert!(!state.all_off());
    }

    #[test]
    fn display_lists_every_led() {
        let state = IndicatorState {
            pending: true,
            cooking: false,
            ready: false,
        };
        assert_eq!(state.to_string(), "pending=ON cooking=off ready=off");
    }
}
