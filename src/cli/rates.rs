use super::ui;
use crate::core::{RateSnapshot, RateTable, currency};

/// Renders every rate in the table against its pivot.
pub fn render(table: &RateTable, as_of: Option<&str>) -> String {
    let mut rates_table = ui::new_styled_table();
    rates_table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Name"),
        ui::header_cell(&format!("Rate (per 1 {})", table.pivot())),
    ]);

    for (code, rate) in table.iter_sorted() {
        rates_table.add_row(vec![
            comfy_table::Cell::new(code),
            ui::optional_text_cell(currency::lookup(code).map(|c| c.name)),
            ui::number_cell(format!("{rate:.6}")),
        ]);
    }

    let mut output = format!(
        "Exchange rates base currency: {}\n",
        ui::style_text(table.pivot(), ui::StyleType::Title)
    );
    if let Some(date) = as_of {
        output.push_str(&ui::style_text(&format!("As of {date}\n"), ui::StyleType::Subtle));
    }
    output.push('\n');
    output.push_str(&rates_table.to_string());
    output
}

pub fn run(snapshot: RateSnapshot) {
    let as_of = snapshot.as_of();
    let table = RateTable::from(snapshot);
    println!("{}", render(&table, as_of.as_deref()));
}
