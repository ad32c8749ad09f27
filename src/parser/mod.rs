//! Generic CSV to row-object parser with encoding and delimiter auto-detection.
//!
//! Converts CSV rows into JSON objects keyed by column header. No sales
//! domain logic lives here; the dataset boundary interprets the rows.

use serde_json::{json, Map, Value};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// A parsed source table with its detection metadata.
#[derive(Debug, Clone)]
pub struct SourceTable {
    /// Parsed rows as JSON objects, one per data line.
    pub rows: Vec<Value>,
    /// Detected or assumed encoding.
    pub encoding: String,
    /// Detected or explicit delimiter.
    pub delimiter: char,
    /// Column headers, in file order.
    pub headers: Vec<String>,
}

impl SourceTable {
    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Detect the encoding of raw bytes using chardet.
pub fn sniff_encoding(bytes: &[u8]) -> String {
    let detected = chardet::detect(bytes);
    let charset = detected.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
pub fn decode_bytes(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.to_string()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        other => {
            if other.is_empty() {
                return Err(CsvError::EncodingError("unknown encoding".into()));
            }
            // Fallback: UTF-8 with lossy conversion
            String::from_utf8_lossy(bytes).to_string()
        }
    };
    Ok(decoded)
}

/// Detect the delimiter by counting candidates in the header line.
pub fn sniff_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let candidates = [',', ';', '\t', '|'];
    let mut best = ',';
    let mut best_count = 0;

    for &sep in &candidates {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best = sep;
        }
    }

    best
}

/// Parse CSV text into row objects with an explicit delimiter.
///
/// Each data line becomes a JSON object whose keys are the column headers.
/// Values are kept as trimmed strings; typing happens at the dataset
/// boundary. Blank lines are skipped, short rows are padded with empty
/// strings, extra cells are ignored.
///
/// # Example
/// ```ignore
/// let csv = "SKU_ID,Revenue\nP001,250\nP002,120";
/// let table = shelfsight::parse_table(csv, ',').unwrap();
/// assert_eq!(table.rows[0]["SKU_ID"], "P001");
/// ```
pub fn parse_table(content: &str, delimiter: char) -> CsvResult<SourceTable> {
    parse_with_metadata(content, delimiter, "utf-8".to_string())
}

fn parse_with_metadata(
    content: &str,
    delimiter: char,
    encoding: String,
) -> CsvResult<SourceTable> {
    let mut lines = content.lines();

    let header_line = lines.next().ok_or(CsvError::EmptyFile)?;
    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|cell| cell.trim().trim_matches('"').to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut rows = Vec::new();

    for (line_idx, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split(delimiter).collect();
        if cells.len() > headers.len() {
            let line_num = line_idx + 2; // header is line 1
            log::warn!(
                "line {line_num}: {} cells for {} headers, extra cells ignored",
                cells.len(),
                headers.len(),
            );
        }

        let mut row = Map::new();
        for (i, header) in headers.iter().enumerate() {
            let value = cells
                .get(i)
                .map(|cell| cell.trim().trim_matches('"'))
                .unwrap_or("");
            row.insert(header.clone(), json!(value));
        }

        rows.push(Value::Object(row));
    }

    Ok(SourceTable {
        rows,
        encoding,
        delimiter,
        headers,
    })
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn read_table_bytes(bytes: &[u8]) -> CsvResult<SourceTable> {
    if bytes.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let encoding = sniff_encoding(bytes);
    let content = decode_bytes(bytes, &encoding)?;
    let delimiter = sniff_delimiter(&content);

    parse_with_metadata(&content, delimiter, encoding)
}

/// Read and parse a CSV file with auto-detection of encoding and delimiter.
pub fn read_table<P: AsRef<Path>>(path: P) -> CsvResult<SourceTable> {
    let bytes = std::fs::read(path.as_ref())?;
    read_table_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_table() {
        let csv = "SKU_ID,Revenue\nP001,250\nP002,120";
        let table = parse_table(csv, ',').unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.headers, vec!["SKU_ID", "Revenue"]);
        assert_eq!(table.rows[0]["SKU_ID"], "P001");
        assert_eq!(table.rows[1]["Revenue"], "120");
    }

    #[test]
    fn test_semicolon_delimiter() {
        let csv = "StoreID;Date\nS001;2023-01-01";
        let table = parse_table(csv, ';').unwrap();

        assert_eq!(table.rows[0]["StoreID"], "S001");
        assert_eq!(table.rows[0]["Date"], "2023-01-01");
    }

    #[test]
    fn test_quoted_cells() {
        let csv = "SKU_ID,PerformanceIssue\nP001,\"Low Conversion Rate\"";
        let table = parse_table(csv, ',').unwrap();

        assert_eq!(table.rows[0]["PerformanceIssue"], "Low Conversion Rate");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let csv = "a,b\n1,2\n\n3,4\n";
        let table = parse_table(csv, ',').unwrap();

        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_short_rows_padded() {
        let csv = "a,b,c\n1,,3\n1";
        let table = parse_table(csv, ',').unwrap();

        assert_eq!(table.rows[0]["b"], "");
        assert_eq!(table.rows[1]["b"], "");
        assert_eq!(table.rows[1]["c"], "");
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(parse_table("", ','), Err(CsvError::EmptyFile)));
        assert!(matches!(read_table_bytes(b""), Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(sniff_delimiter("a\tb\tc"), '\t');
        assert_eq!(sniff_delimiter("a|b|c"), '|');
    }

    #[test]
    fn test_auto_detection() {
        let csv = "SKU_ID;StockoutRiskScore\nP001;0.85\nP002;0.5";
        let table = read_table_bytes(csv.as_bytes()).unwrap();

        assert_eq!(table.delimiter, ';');
        assert_eq!(table.encoding, "utf-8");
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_bytes(bytes, "iso-8859-1").unwrap();
        assert!(decoded.starts_with("Soci"));
    }
}
