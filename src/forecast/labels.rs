use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Display language for bucket labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
}

impl Language {
    pub fn weekday_name(&self, weekday: Weekday) -> &'static str {
        match self {
            Language::En => match weekday {
                Weekday::Mon => "Monday",
                Weekday::Tue => "Tuesday",
                Weekday::Wed => "Wednesday",
                Weekday::Thu => "Thursday",
                Weekday::Fri => "Friday",
                Weekday::Sat => "Saturday",
                Weekday::Sun => "Sunday",
            },
            Language::Ko => match weekday {
                Weekday::Mon => "월요일",
                Weekday::Tue => "화요일",
                Weekday::Wed => "수요일",
                Weekday::Thu => "목요일",
                Weekday::Fri => "금요일",
                Weekday::Sat => "토요일",
                Weekday::Sun => "일요일",
            },
        }
    }

    pub fn payday_label(&self) -> &'static str {
        match self {
            Language::En => "Payday (!)",
            Language::Ko => "월급날 🚨",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_labels_cover_every_weekday() {
        assert_eq!(Language::Ko.weekday_name(Weekday::Wed), "수요일");
        assert_eq!(Language::En.weekday_name(Weekday::Sun), "Sunday");
        assert_eq!(serde_json::to_string(&Language::Ko).unwrap(), "\"ko\"");
    }
}
