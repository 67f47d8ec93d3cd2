use super::ui;
use crate::core::{ConvertError, RateTable, convert, currency};

/// Formats a completed conversion as `$100.00 = €90.00`.
pub fn format_conversion(from: &str, to: &str, amount: f64, result: f64) -> String {
    format!(
        "{} = {}",
        currency::format_amount(from, amount),
        ui::style_text(&currency::format_amount(to, result), ui::StyleType::Result)
    )
}

/// Converts once and, when `reverse` is set, converts the same amount back the other way.
pub fn render(
    table: &RateTable,
    from: &str,
    to: &str,
    amount: f64,
    reverse: bool,
) -> Result<String, ConvertError> {
    let result = convert::convert(table, from, to, amount)?;
    let mut output = format_conversion(from, to, amount, result);

    if reverse {
        let reversed = convert::reverse(table, from, to, amount)?;
        output.push('\n');
        output.push_str(&format_conversion(to, from, amount, reversed));
    }
    Ok(output)
}

pub fn run(
    table: &RateTable,
    from: &str,
    to: &str,
    amount: f64,
    reverse: bool,
) -> anyhow::Result<()> {
    let output = render(table, from, to, amount, reverse)?;
    println!("{output}");
    Ok(())
}
