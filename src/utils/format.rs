use std::str::FromStr;

use crate::error::StatsError;
use crate::models::Month;

/// Output language. Passed explicitly to every formatting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Portuguese,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Portuguese => "pt",
        }
    }
}

impl FromStr for Language {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "pt" | "pt-br" | "portuguese" => Ok(Language::Portuguese),
            other => Err(StatsError::InvalidConfig(format!("unknown language '{}'", other))),
        }
    }
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const MONTHS_PT: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

pub fn month_name(month: Month, lang: Language) -> &'static str {
    let idx = (month.number() - 1) as usize;
    match lang {
        Language::English => MONTHS_EN[idx],
        Language::Portuguese => MONTHS_PT[idx],
    }
}

/// Rank `0` is the "did not play" sentinel and is never printed as a number.
pub fn format_rank(rank: u32, lang: Language) -> String {
    if rank == 0 {
        return match lang {
            Language::English => "did not play".to_string(),
            Language::Portuguese => "não jogou".to_string(),
        };
    }
    format!("#{}", rank)
}

pub fn format_delta(delta: i64) -> String {
    if delta > 0 {
        format!("+{}", delta)
    } else {
        format!("{}", delta)
    }
}

pub fn format_decimal_delta(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{:.1}", delta)
    } else {
        format!("{:.1}", delta)
    }
}

/// Format a decimal, trimming a trailing ".0"
pub fn format_decimal(value: f64) -> String {
    if value == value.floor() {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

pub fn format_percent(value: u32) -> String {
    format!("{}%", value)
}

pub fn games_label(count: u32, lang: Language) -> String {
    match (lang, count) {
        (Language::English, 1) => "1 game".to_string(),
        (Language::English, n) => format!("{} games", n),
        (Language::Portuguese, 1) => "1 jogo".to_string(),
        (Language::Portuguese, n) => format!("{} jogos", n),
    }
}

/// Simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Pad to a display width, counting wide and accented characters correctly.
pub fn pad_display(s: &str, width: usize) -> String {
    let w = unicode_width::UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_sentinel_is_never_a_number() {
        assert_eq!(format_rank(0, Language::English), "did not play");
        assert_eq!(format_rank(0, Language::Portuguese), "não jogou");
        assert_eq!(format_rank(3, Language::English), "#3");
    }

    #[test]
    fn month_names_follow_language() {
        assert_eq!(month_name(Month::March, Language::English), "March");
        assert_eq!(month_name(Month::March, Language::Portuguese), "Março");
    }

    #[test]
    fn deltas_carry_sign() {
        assert_eq!(format_delta(3), "+3");
        assert_eq!(format_delta(-2), "-2");
        assert_eq!(format_delta(0), "0");
        assert_eq!(format_decimal_delta(1.5), "+1.5");
        assert_eq!(format_decimal_delta(-0.4), "-0.4");
    }

    #[test]
    fn pads_accented_names_by_display_width() {
        assert_eq!(pad_display("João", 6), "João  ");
        assert_eq!(pad_display("toolongname", 4), "toolongname");
    }

    #[test]
    fn progress_bar_handles_zero_total() {
        assert_eq!(progress_bar(0, 0, 4), "░░░░");
        assert_eq!(progress_bar(2, 4, 4), "██░░");
    }

    #[test]
    fn parses_language_codes() {
        assert_eq!("PT".parse::<Language>().unwrap(), Language::Portuguese);
        assert!("xx".parse::<Language>().is_err());
    }
}
