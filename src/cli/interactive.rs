use super::{convert::format_conversion, ui};
use crate::core::{ConversionHistory, RateTable, convert, currency};
use anyhow::Result;
use comfy_table::Cell;
use std::io::{BufRead, Write};
use tracing::debug;

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    // Undecodable bytes become U+FFFD so bad input is rejected like any other answer.
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "yes" | "y")
}

/// Maps a quick-pick number to its currency code, or uppercases a typed code.
fn resolve_choice(answer: &str) -> String {
    match answer.parse::<usize>() {
        Ok(n) if (1..=currency::KNOWN_CURRENCIES.len()).contains(&n) => {
            currency::KNOWN_CURRENCIES[n - 1].code.to_string()
        }
        _ => answer.to_ascii_uppercase(),
    }
}

/// Numbered list of the well-known currencies present in `table`.
fn render_quick_picks(table: &RateTable) -> String {
    currency::KNOWN_CURRENCIES
        .iter()
        .enumerate()
        .filter(|(_, info)| table.contains(info.code))
        .map(|(index, info)| format!("  {}. {} ({})", index + 1, info.name, info.code))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompts until the user enters a code present in `table`, either typed or as a quick-pick
/// number. When `history` is given, answering `history` prints it and asks again. `None` on
/// end of input.
fn prompt_currency<R: BufRead, W: Write>(
    table: &RateTable,
    history: Option<&ConversionHistory>,
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<String>> {
    loop {
        let Some(answer) = prompt(input, output, message)? else {
            return Ok(None);
        };
        if let Some(history) = history {
            if answer.eq_ignore_ascii_case("history") {
                if history.is_empty() {
                    writeln!(output, "No conversion history available.")?;
                } else {
                    writeln!(output, "{}", render_history(history))?;
                }
                continue;
            }
        }
        let code = resolve_choice(&answer);
        if table.contains(&code) {
            return Ok(Some(code));
        }
        writeln!(
            output,
            "{}",
            ui::style_text(&format!("{code} is not available."), ui::StyleType::Error)
        )?;
    }
}

/// Prompts until the user enters a finite number. `None` on end of input.
fn prompt_amount<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<f64>> {
    loop {
        let Some(answer) = prompt(input, output, "Enter the amount to convert: ")? else {
            return Ok(None);
        };
        match answer.parse::<f64>() {
            Ok(amount) if amount.is_finite() => return Ok(Some(amount)),
            _ => writeln!(
                output,
                "{}",
                ui::style_text(
                    "Invalid amount. Please enter a numeric value.",
                    ui::StyleType::Error
                )
            )?,
        }
    }
}

pub fn render_history(history: &ConversionHistory) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Time"),
        ui::header_cell("Amount"),
        ui::header_cell("Result"),
    ]);
    for (index, conversion) in history.entries().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(conversion.timestamp.format("%d/%m/%Y %H:%M:%S")),
            ui::number_cell(currency::format_amount(&conversion.from, conversion.amount)),
            ui::number_cell(currency::format_amount(&conversion.to, conversion.result)),
        ]);
    }
    table.to_string()
}

/// Runs the prompt loop until the user declines to continue or input ends.
///
/// Unknown currency codes and unparseable amounts are reported and asked for again.
pub fn run<R: BufRead, W: Write>(
    table: &RateTable,
    input: &mut R,
    output: &mut W,
) -> Result<ConversionHistory> {
    let mut history = ConversionHistory::new();

    writeln!(
        output,
        "Exchange rates base currency: {}",
        ui::style_text(table.pivot(), ui::StyleType::Title)
    )?;
    writeln!(output, "Available currencies: {}", table.codes().join(", "))?;
    let quick_picks = render_quick_picks(table);
    if !quick_picks.is_empty() {
        writeln!(output, "Quick picks:\n{quick_picks}")?;
    }
    writeln!(
        output,
        "{}",
        ui::style_text(
            "Enter a code or quick-pick number; `history` at the source prompt lists conversions.",
            ui::StyleType::Subtle
        )
    )?;

    loop {
        writeln!(output, "\n{}", ui::style_text("Currency Converter", ui::StyleType::Label))?;

        let Some(from) = prompt_currency(
            table,
            Some(&history),
            input,
            output,
            &format!("Enter the source currency (e.g., {}): ", table.pivot()),
        )?
        else {
            break;
        };
        let Some(to) = prompt_currency(
            table,
            None,
            input,
            output,
            "Enter the target currency (e.g., EUR): ",
        )?
        else {
            break;
        };
        let Some(amount) = prompt_amount(input, output)? else {
            break;
        };

        match convert::convert(table, &from, &to, amount) {
            Ok(result) => {
                debug!(%from, %to, amount, result, "Converted");
                writeln!(output, "{}", format_conversion(&from, &to, amount, result))?;
                history.record(&from, &to, amount, result);
            }
            Err(e) => writeln!(output, "{}", ui::style_text(&e.to_string(), ui::StyleType::Error))?,
        }

        let Some(answer) = prompt(
            input,
            output,
            "Would you like to reverse the conversion? (yes/no): ",
        )?
        else {
            break;
        };
        if is_yes(&answer) {
            match convert::reverse(table, &from, &to, amount) {
                Ok(result) => {
                    writeln!(output, "{}", format_conversion(&to, &from, amount, result))?;
                    history.record(&to, &from, amount, result);
                }
                Err(e) => {
                    writeln!(output, "{}", ui::style_text(&e.to_string(), ui::StyleType::Error))?
                }
            }
        }

        let again = prompt(
            input,
            output,
            "Do you want to convert again, with other currencies? (yes/no): ",
        )?;
        if !again.as_deref().is_some_and(is_yes) {
            break;
        }
    }

    if !history.is_empty() {
        writeln!(
            output,
            "\n{}\n{}",
            ui::style_text("Conversion History", ui::StyleType::Title),
            render_history(&history)
        )?;
    }

    Ok(history)
}
