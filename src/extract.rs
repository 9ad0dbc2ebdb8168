use crate::error::{PipelineError, Result};
use crate::models::{RateRecord, Snapshot};
use scraper::{ElementRef, Html, Selector};

/// Pull the target currencies out of one listing page.
///
/// The page carries a navigation table first and the quote table second;
/// a document with fewer than two tables is not a listing page.
pub fn extract_rates(html: &str, targets: &[String]) -> Result<Snapshot> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").unwrap();
    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let tables: Vec<ElementRef> = document.select(&table_sel).collect();
    if tables.len() < 2 {
        return Err(PipelineError::Parse(format!(
            "expected at least 2 tables, found {}",
            tables.len()
        )));
    }

    let mut snapshot = Snapshot::new();
    // First row is the header.
    for row in tables[1].select(&row_sel).skip(1) {
        let cells: Vec<String> = row
            .select(&cell_sel)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();
        if let Some((currency, record)) = row_to_record(&cells, targets) {
            snapshot.insert(currency, record);
        }
    }
    Ok(snapshot)
}

/// Column contract of the quote table. Columns are positional, not named:
/// 0 = currency, 3 = spot selling rate, 6 = publish date (first 10 chars),
/// 7 = publish time. A row missing a required column does not qualify; the
/// date and time columns are optional.
fn row_to_record(cells: &[String], targets: &[String]) -> Option<(String, RateRecord)> {
    let currency = cells.first()?;
    if !targets.iter().any(|t| t == currency) {
        return None;
    }
    let rate = cells.get(3)?.clone();
    let update_date = cells.get(6).map(|c| c.chars().take(10).collect());
    let update_time = cells.get(7).cloned();

    Some((
        currency.clone(),
        RateRecord {
            rate,
            update_date,
            update_time,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &str) -> String {
        format!(
            "<html><body>\
             <table><tr><td>首页</td><td>外汇牌价</td></tr></table>\
             <table><tr><th>货币名称</th><th>现汇买入价</th></tr>{rows}</table>\
             </body></html>"
        )
    }

    fn targets() -> Vec<String> {
        vec!["美元".to_string(), "欧元".to_string()]
    }

    #[test]
    fn fewer_than_two_tables_is_an_error() {
        let html = "<html><body><table><tr><td>美元</td></tr></table></body></html>";
        let result = extract_rates(html, &targets());
        assert!(matches!(result, Err(PipelineError::Parse(_))));
    }

    #[test]
    fn rate_is_the_trimmed_fourth_cell() {
        let html = page(
            "<tr><td>美元</td><td>710.2</td><td>704.4</td><td> 713.5 </td>\
             <td>713.5</td><td>709.8</td><td>2024.01.02 10:30:00</td><td>10:30:00</td></tr>",
        );
        let snapshot = extract_rates(&html, &targets()).unwrap();
        let record = &snapshot["美元"];
        assert_eq!(record.rate, "713.5");
        assert_eq!(record.update_date.as_deref(), Some("2024.01.02"));
        assert_eq!(record.update_time.as_deref(), Some("10:30:00"));
    }

    #[test]
    fn rows_without_date_columns_still_carry_the_rate() {
        let html = page("<tr><td>欧元</td><td>780.1</td><td>776.0</td><td>785.9</td></tr>");
        let snapshot = extract_rates(&html, &targets()).unwrap();
        let record = &snapshot["欧元"];
        assert_eq!(record.rate, "785.9");
        assert_eq!(record.update_date, None);
        assert_eq!(record.update_time, None);
    }

    #[test]
    fn short_and_foreign_rows_are_skipped() {
        let html = page(
            "<tr><td>美元</td><td>710.2</td></tr>\
             <tr><td>瑞士法郎</td><td>801.1</td><td>798.0</td><td>806.3</td></tr>",
        );
        let snapshot = extract_rates(&html, &targets()).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn later_duplicate_row_wins() {
        let html = page(
            "<tr><td>美元</td><td>1</td><td>2</td><td>710.0</td></tr>\
             <tr><td>美元</td><td>1</td><td>2</td><td>711.0</td></tr>",
        );
        let snapshot = extract_rates(&html, &targets()).unwrap();
        assert_eq!(snapshot["美元"].rate, "711.0");
    }

    #[test]
    fn header_row_is_never_extracted() {
        // A header written with td cells instead of th must still be skipped.
        let html = "<html><body><table></table>\
                    <table>\
                    <tr><td>美元</td><td>a</td><td>b</td><td>head</td></tr>\
                    <tr><td>美元</td><td>1</td><td>2</td><td>710.0</td></tr>\
                    </table></body></html>";
        let snapshot = extract_rates(html, &targets()).unwrap();
        assert_eq!(snapshot["美元"].rate, "710.0");
    }
}
