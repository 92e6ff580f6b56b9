use std::io::BufRead;

use complaint_triage_core::{ComplaintRecord, Result, TriageError};

use crate::args::InputFormat;

/// Read complaint records in the given format
pub fn read_records<R: BufRead>(reader: R, format: InputFormat) -> Result<Vec<ComplaintRecord>> {
    match format {
        InputFormat::Jsonl => read_jsonl(reader),
        InputFormat::Lines => read_lines(reader),
    }
}

fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<ComplaintRecord>> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: ComplaintRecord =
            serde_json::from_str(&line).map_err(|e| TriageError::InputParse {
                line: index + 1,
                message: e.to_string(),
            })?;
        records.push(record);
    }

    Ok(records)
}

// Every line is a record, including empty ones (empty text, not absent)
fn read_lines<R: BufRead>(reader: R) -> Result<Vec<ComplaintRecord>> {
    reader
        .lines()
        .enumerate()
        .map(|(index, line)| -> Result<ComplaintRecord> {
            let text = line?;
            Ok(ComplaintRecord {
                id: index as i64 + 1,
                text: Some(text),
            })
        })
        .collect()
}
