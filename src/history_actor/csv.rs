//! # History File Codec
//!
//! The history file is a comma-separated table:
//!
//! ```text
//! Order ID,Table Number,Customer Order,Total Bill,Tip,Entry Time,Exit Time
//! 1,3,"Coffee x2, Cake x1",190.00,15.00,2024-03-01 12:00:00,2024-03-01 12:40:00
//! ```
//!
//! Fields holding a comma, quote or line break are quoted, with embedded
//! quotes doubled. Money is written with two decimals; any decimal notation
//! is accepted on read. Blank lines are ignored.

use super::HistoryError;
use crate::model::{HistoryRecord, OrderId, TableNumber, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const HEADER: [&str; 7] = [
    "Order ID",
    "Table Number",
    "Customer Order",
    "Total Bill",
    "Tip",
    "Entry Time",
    "Exit Time",
];

/// Renders the header and every record.
pub fn encode(records: &[HistoryRecord]) -> String {
    let mut out = String::new();
    write_row(&mut out, HEADER);
    for record in records {
        write_row(
            &mut out,
            [
                record.order_id.to_string(),
                record.table.to_string(),
                record.order_summary.clone(),
                format!("{:.2}", record.total_bill),
                format!("{:.2}", record.tip),
                record.entry_time.format(TIMESTAMP_FORMAT).to_string(),
                record.exit_time.format(TIMESTAMP_FORMAT).to_string(),
            ],
        );
    }
    out
}

/// Parses a whole file. Empty input is an empty history.
pub fn decode(text: &str) -> Result<Vec<HistoryRecord>, HistoryError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = split_rows(text)?.into_iter();

    let Some((line, header)) = rows.next() else {
        return Ok(Vec::new());
    };
    if header.iter().map(|name| name.trim()).ne(HEADER) {
        return Err(HistoryError::Malformed {
            line,
            reason: format!("unexpected header {header:?}"),
        });
    }

    rows.map(|(line, fields)| parse_record(line, &fields))
        .collect()
}

fn write_row<I>(out: &mut String, fields: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        let field = field.as_ref();
        if field.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

/// Splits text into rows of unquoted fields, tagged with their starting line.
fn split_rows(text: &str) -> Result<Vec<(usize, Vec<String>)>, HistoryError> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut row_has_content = false;
    let mut line = 1;
    let mut row_start = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                row_has_content = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                row_has_content = true;
            }
            '\r' => {}
            '\n' => {
                if row_has_content {
                    fields.push(std::mem::take(&mut field));
                    rows.push((row_start, std::mem::take(&mut fields)));
                }
                line += 1;
                row_start = line;
                row_has_content = false;
            }
            _ => {
                field.push(c);
                row_has_content = true;
            }
        }
    }

    if in_quotes {
        return Err(HistoryError::Malformed {
            line: row_start,
            reason: "unterminated quoted field".into(),
        });
    }
    if row_has_content {
        fields.push(field);
        rows.push((row_start, fields));
    }
    Ok(rows)
}

fn parse_record(line: usize, fields: &[String]) -> Result<HistoryRecord, HistoryError> {
    let malformed = |reason: String| HistoryError::Malformed { line, reason };

    let [order_id, table, summary, total, tip, entry, exit] = fields else {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            HEADER.len(),
            fields.len()
        )));
    };

    let number = |name: &str, value: &str| {
        value
            .trim()
            .parse::<u32>()
            .map_err(|e| malformed(format!("{name} {value:?}: {e}")))
    };
    let money = |name: &str, value: &str| {
        Decimal::from_str(value.trim()).map_err(|e| malformed(format!("{name} {value:?}: {e}")))
    };
    let timestamp = |name: &str, value: &str| {
        NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
            .map_err(|e| malformed(format!("{name} {value:?}: {e}")))
    };

    let id = number("Order ID", order_id)?;
    if id == u32::MAX {
        return Err(malformed(format!("Order ID {id} leaves no id for the next order")));
    }

    Ok(HistoryRecord {
        order_id: OrderId(id),
        table: TableNumber(number("Table Number", table)?),
        order_summary: summary.clone(),
        total_bill: money("Total Bill", total)?,
        tip: money("Tip", tip)?,
        entry_time: timestamp("Entry Time", entry)?,
        exit_time: timestamp("Exit Time", exit)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn record(id: u32, summary: &str) -> HistoryRecord {
        HistoryRecord {
            order_id: OrderId(id),
            table: TableNumber(3),
            order_summary: summary.to_string(),
            total_bill: Decimal::new(19000, 2),
            tip: Decimal::new(1550, 2),
            entry_time: at(12, 0),
            exit_time: at(12, 40),
        }
    }

    #[test]
    fn test_encode_quotes_multi_item_summaries() {
        let text = encode(&[record(1, "Coffee x2, Cake x1"), record(2, "Tea x1")]);
        assert_eq!(
            text,
            "Order ID,Table Number,Customer Order,Total Bill,Tip,Entry Time,Exit Time\n\
             1,3,\"Coffee x2, Cake x1\",190.00,15.50,2024-03-01 12:00:00,2024-03-01 12:40:00\n\
             2,3,Tea x1,190.00,15.50,2024-03-01 12:00:00,2024-03-01 12:40:00\n"
        );
    }

    #[test]
    fn test_written_rows_read_back_unchanged() {
        let records = vec![
            record(1, "Coffee x2, Cake x1"),
            record(2, "say \"hi\""),
            record(7, ""),
        ];
        assert_eq!(decode(&encode(&records)).unwrap(), records);
    }

    #[test]
    fn test_decode_accepts_foreign_number_formats() {
        let text = "\u{feff}Order ID,Table Number,Customer Order,Total Bill,Tip,Entry Time,Exit Time\r\n\
                    4,2,\"Burger x1, Fries x2\",165.0,0.0,2024-03-01 12:00:00,2024-03-01 12:40:00\r\n\
                    \r\n";
        let records = decode(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].order_id, OrderId(4));
        assert_eq!(records[0].total_bill, Decimal::new(165, 0));
        assert_eq!(records[0].order_summary, "Burger x1, Fries x2");
    }

    #[test]
    fn test_decode_reports_the_offending_line() {
        assert_eq!(decode("").unwrap(), vec![]);
        assert!(matches!(
            decode("id,table\n"),
            Err(HistoryError::Malformed { line: 1, .. })
        ));

        let header = HEADER.join(",");
        let short_row = format!("{header}\n\n1,2,Tea x1\n");
        assert!(matches!(
            decode(&short_row),
            Err(HistoryError::Malformed { line: 3, .. })
        ));

        let bad_time = format!("{header}\n1,2,Tea x1,10,0,yesterday,2024-03-01 12:40:00\n");
        assert!(matches!(
            decode(&bad_time),
            Err(HistoryError::Malformed { line: 2, reason }) if reason.contains("Entry Time")
        ));

        let last_id = format!(
            "{header}\n1,2,Tea x1,10,0,2024-03-01 12:00:00,2024-03-01 12:40:00\n\
             4294967295,1,Tea x1,10,0,2024-03-01 12:00:00,2024-03-01 12:40:00\n"
        );
        assert!(matches!(
            decode(&last_id),
            Err(HistoryError::Malformed { line: 3, reason }) if reason.contains("Order ID")
        ));

        let open_quote = format!("{header}\n1,2,\"Tea x1,10,0\n");
        assert!(matches!(
            decode(&open_quote),
            Err(HistoryError::Malformed { line: 2, .. })
        ));
    }
}
