//! Streaming output helpers (made by FontLab https://www.fontlab.com/)

use std::io::{self, Write};

use serde::Serialize;

/// Write a value as prettified JSON.
pub fn write_json_pretty<T: Serialize>(value: &T, mut w: impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    w.write_all(json.as_bytes())?;
    Ok(())
}

/// Write items as newline-delimited JSON (NDJSON).
pub fn write_ndjson<T: Serialize>(items: &[T], mut w: impl Write) -> io::Result<()> {
    for item in items {
        let line = serde_json::to_string(item).map_err(io::Error::other)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FamilyEntry;

    fn sample_entries() -> Vec<FamilyEntry> {
        vec![
            FamilyEntry {
                family: "Roboto".to_string(),
            },
            FamilyEntry {
                family: "Noto Sans".to_string(),
            },
        ]
    }

    #[test]
    fn ndjson_writes_one_line_per_entry() {
        let mut buf = Vec::new();
        write_ndjson(&sample_entries(), &mut buf).expect("write ndjson");

        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: FamilyEntry = serde_json::from_str(lines[0]).expect("parse");
        assert_eq!(parsed.family, "Roboto");
    }

    #[test]
    fn pretty_json_round_trips() {
        let mut buf = Vec::new();
        write_json_pretty(&sample_entries(), &mut buf).expect("write json");

        let parsed: Vec<FamilyEntry> = serde_json::from_slice(&buf).expect("parse");
        assert_eq!(parsed, sample_entries());
    }
}
