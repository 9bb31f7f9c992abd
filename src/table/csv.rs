// src/table/csv.rs

//! CSV decoding into [`RowsOfFields`].

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use super::RowsOfFields;
use crate::step::Step;

/// Decode comma-separated records. The first record is kept as the header
/// row. Records may be ragged; shape is checked by the table helpers.
pub fn decode<R: Read>(reader: R) -> Result<RowsOfFields, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(RowsOfFields(rows))
}

impl Step {
    /// Read and decode `filename`. Returns no rows when the step is already
    /// failed or the file cannot be read or parsed (the step then fails).
    pub fn read_csv(&mut self, filename: impl AsRef<Path>) -> RowsOfFields {
        let path = filename.as_ref();
        let shown = path.display().to_string();
        let mut rows = RowsOfFields::default();
        self.operate("ReadCSV", &[shown.as_str()], |step| {
            let reader = match step.filesystem().open_read(path) {
                Ok(reader) => reader,
                Err(err) => {
                    step.fail_err(err);
                    return;
                }
            };
            match decode(reader) {
                Ok(decoded) => rows = decoded,
                Err(err) => {
                    step.fail_err(err);
                }
            }
        });
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_quoted_fields_and_keeps_the_header() {
        let input = "name,motto\nbill,\"hello, world\"\nann,\"say \"\"hi\"\"\"\n";
        let rows = decode(input.as_bytes()).unwrap();
        assert_eq!(
            rows.0,
            vec![
                vec!["name".to_string(), "motto".to_string()],
                vec!["bill".to_string(), "hello, world".to_string()],
                vec!["ann".to_string(), "say \"hi\"".to_string()],
            ]
        );
    }

    #[test]
    fn ragged_records_are_kept_as_read() {
        let input = "one,two,three\n1,2,3\n4,5\n";
        let rows = decode(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec!["4".to_string(), "5".to_string()]);
    }

}
