use crate::auction::Amount;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    /// Whole-unit ruble amount, grouped the way the locale groups digits
    pub fn format_price(self, price: Amount) -> String {
        match self {
            Locale::Ru => format!("{}\u{a0}₽", group_digits(price, '\u{a0}')),
            Locale::En => format!("₽{}", group_digits(price, ',')),
        }
    }

    pub fn loading_label(self) -> &'static str {
        match self {
            Locale::Ru => "Загрузка...",
            Locale::En => "loading...",
        }
    }
}

fn group_digits(value: Amount, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
