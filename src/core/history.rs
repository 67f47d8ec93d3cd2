use chrono::{DateTime, Local};

/// A single completed conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub timestamp: DateTime<Local>,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub result: f64,
}

/// Conversions made during the current session, oldest first. Nothing is written to disk.
#[derive(Debug, Default)]
pub struct ConversionHistory {
    entries: Vec<Conversion>,
}

impl ConversionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, from: &str, to: &str, amount: f64, result: f64) {
        self.entries.push(Conversion {
            timestamp: Local::now(),
            from: from.to_string(),
            to: to.to_string(),
            amount,
            result,
        });
    }

    pub fn entries(&self) -> &[Conversion] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
