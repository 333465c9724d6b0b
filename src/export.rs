use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::parser::Scored;
use crate::record::{Field, Record};

pub const DEFAULT_THRESHOLD: f64 = 0.5;
const DELIMITER: u8 = b';';

/// Keep records scoring strictly above `threshold`, in their original order.
pub fn select(scored: Vec<Scored>, threshold: f64) -> Vec<Record> {
    scored
        .into_iter()
        .filter(|s| s.confidence > threshold)
        .map(|s| s.record)
        .collect()
}

/// Header from the static schema, then one `;`-delimited row per record.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(writer);

    csv_writer.write_record(Field::ALL.iter().map(|f| f.name()))?;
    for record in records {
        csv_writer.write_record(record.row())?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_file(path: &Path, records: &[Record]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_records(file, records)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(url: &str, confidence: f64) -> Scored {
        Scored {
            record: Record::new(url, None),
            confidence,
        }
    }

    fn render(records: &[Record]) -> String {
        let mut buf = Vec::new();
        write_records(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn threshold_is_strict_and_ordered() {
        let batch = vec![
            scored("a", 0.9),
            scored("b", 0.4),
            scored("c", 0.5),
            scored("d", 0.51),
        ];
        let kept = select(batch, DEFAULT_THRESHOLD);
        let urls: Vec<&str> = kept.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "d"]);
    }

    #[test]
    fn empty_batch_writes_header_only() {
        let out = render(&[]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("url;category;age;academic_level;"));
        assert!(lines[0].ends_with(";salary;monthly_gross;anual_gross"));
        assert_eq!(lines[0].split(';').count(), 20);
    }

    #[test]
    fn rows_follow_header_columns() {
        let mut r = Record::new("https://redd.it/x", Some("IT"));
        r.set(Field::Age, Some("28".into()));
        r.set(Field::AnualGross, Some("18000€/ano".into()));
        let out = render(&[r]);
        let row = out.lines().nth(1).unwrap();
        let cells: Vec<&str> = row.split(';').collect();
        assert_eq!(cells.len(), 20);
        assert_eq!(cells[0], "https://redd.it/x");
        assert_eq!(cells[1], "IT");
        assert_eq!(cells[2], "28");
        assert_eq!(cells[3], "");
        assert_eq!(cells[19], "18000€/ano");
    }

    #[test]
    fn delimiter_and_quotes_are_escaped() {
        let mut r = Record::new("u", None);
        r.set(Field::Sector, Some("Banca; Seguros".into()));
        r.set(Field::CurrentPosition, Some("\"Senior\" Dev".into()));
        let out = render(&[r]);
        assert!(out.contains("\"Banca; Seguros\""));
        assert!(out.contains("\"\"\"Senior\"\" Dev\""));

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .from_reader(out.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[7], "Banca; Seguros");
        assert_eq!(&row[11], "\"Senior\" Dev");
    }
}
