#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallDirection {
    Incoming,
    Outgoing,
    Missed,
}

impl std::fmt::Display for CallDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallDirection::Incoming => write!(f, "Incoming"),
            CallDirection::Outgoing => write!(f, "Outgoing"),
            CallDirection::Missed => write!(f, "Missed"),
        }
    }
}

impl CallDirection {
    /// List marker glyph for the call direction
    pub fn marker(&self) -> &'static str {
        match self {
            CallDirection::Incoming => "↙",
            CallDirection::Outgoing => "↗",
            CallDirection::Missed => "✗",
        }
    }
}

/// An entry in the call history
#[derive(Debug, Clone)]
pub struct Call {
    pub id: i64,
    pub name: String,
    pub direction: CallDirection,
    /// Display label: "Today 14:30", "Yesterday 18:22", ...
    pub time: String,
    /// mm:ss, absent for missed calls
    pub duration: Option<String>,
    pub avatar: String,
}

impl Call {
    /// "Today 14:30 • 15:43" or just the time for missed calls
    pub fn time_line(&self) -> String {
        match &self.duration {
            Some(duration) => format!("{} • {}", self.time, duration),
            None => self.time.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_line_includes_duration_when_present() {
        let call = Call {
            id: 1,
            name: "Anonymous #4782".to_string(),
            direction: CallDirection::Incoming,
            time: "Today 14:30".to_string(),
            duration: Some("15:43".to_string()),
            avatar: "A4".to_string(),
        };
        assert_eq!(call.time_line(), "Today 14:30 • 15:43");
    }

    #[test]
    fn test_time_line_for_missed_call() {
        let call = Call {
            id: 3,
            name: "Anonymous #2341".to_string(),
            direction: CallDirection::Missed,
            time: "3 days ago".to_string(),
            duration: None,
            avatar: "A2".to_string(),
        };
        assert_eq!(call.time_line(), "3 days ago");
    }
}
