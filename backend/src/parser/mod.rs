//! CSV reading with encoding and delimiter auto-detection.
//!
//! Raw bytes are decoded into text, parsed into rows, then mapped onto
//! [`MentionRecord`]s by column name.

use serde_json::{Map, Value};

use crate::error::{CsvError, CsvResult};
use crate::models::{columns, MentionRecord, MentionTable};

/// Below this, chardet's guess is ignored in favour of Latin-1.
const MIN_CHARDET_CONFIDENCE: f32 = 0.5;

/// One data row with its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source file.
    pub line: usize,
    pub values: Vec<String>,
}

impl RawRow {
    /// Value at `idx`, empty when the row is short.
    pub fn get(&self, idx: usize) -> &str {
        self.values.get(idx).map(String::as_str).unwrap_or("")
    }
}

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Data rows (header excluded)
    pub rows: Vec<RawRow>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
}

impl ParseResult {
    /// Rows as JSON objects keyed by header.
    pub fn to_json_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let obj: Map<String, Value> = self
                    .headers
                    .iter()
                    .enumerate()
                    .map(|(i, h)| (h.clone(), Value::String(row.get(i).to_string())))
                    .collect();
                Value::Object(obj)
            })
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 wins outright; otherwise chardet guesses and anything it
/// can't name is treated as Latin-1.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let (charset, confidence, _) = chardet::detect(bytes);
    if confidence < MIN_CHARDET_CONFIDENCE {
        return "iso-8859-1".to_string();
    }

    match charset.to_lowercase().as_str() {
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        // not valid UTF-8, so an ascii/utf-8 guess is wrong
        "ascii" | "utf-8" | "utf8" => "iso-8859-1".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(_) => other.to_string(),
            None => "iso-8859-1".to_string(),
        },
    }
}

/// Decode bytes to string using the specified encoding label.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let label = encoding.trim().to_lowercase();
    let label = match label.as_str() {
        "latin-1" => "latin1",
        other => other,
    };

    let encoding = encoding_rs::Encoding::for_label(label.as_bytes())
        .ok_or_else(|| CsvError::Encoding(encoding.to_string()))?;

    // decode() sniffs and strips a BOM before falling back to `encoding`
    let (text, _, _) = encoding.decode(bytes);
    Ok(text.into_owned())
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text with an explicit delimiter.
pub fn parse_str(content: &str, delimiter: char, encoding: String) -> CsvResult<ParseResult> {
    if !delimiter.is_ascii() {
        return Err(CsvError::InvalidDelimiter(delimiter));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::EmptyFile);
    }

    let mut rows = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        rows.push(RawRow {
            line,
            values: record.iter().map(String::from).collect(),
        });
    }

    Ok(ParseResult {
        rows,
        encoding,
        delimiter,
        headers,
    })
}

/// Parse raw bytes, detecting whatever isn't given explicitly.
pub fn parse_bytes(
    bytes: &[u8],
    encoding: Option<&str>,
    delimiter: Option<char>,
) -> CsvResult<ParseResult> {
    let encoding = match encoding {
        Some(label) => label.to_string(),
        None => detect_encoding(bytes),
    };

    let content = decode_content(bytes, &encoding)?;

    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    parse_str(&content, delimiter, encoding)
}

/// Map parsed rows onto mention records.
///
/// Fails on the first required column that is missing from the header.
pub fn mention_table(parsed: &ParseResult) -> CsvResult<MentionTable> {
    let require = |name: &str| {
        parsed
            .column(name)
            .ok_or_else(|| CsvError::MissingColumn(name.to_string()))
    };

    let subject = require(columns::SUBJECT)?;
    let mention = require(columns::MENTION)?;
    let scientists = require(columns::SCIENTIST)?;
    let genders = require(columns::GENDER)?;
    let mention_type = require(columns::MENTION_TYPE)?;
    let nationalities = require(columns::NATIONALITY)?;
    let regions = require(columns::REGION)?;
    let examinable = parsed.column(columns::EXAMINABLE);

    let records = parsed
        .rows
        .iter()
        .map(|row| MentionRecord {
            line: row.line,
            subject: row.get(subject).to_string(),
            mention: row.get(mention).to_string(),
            scientists: row.get(scientists).to_string(),
            genders: row.get(genders).to_string(),
            mention_type: row.get(mention_type).to_string(),
            nationalities: row.get(nationalities).to_string(),
            regions: row.get(regions).to_string(),
            examinable: examinable.map(|idx| row.get(idx).to_string()),
        })
        .collect();

    Ok(MentionTable {
        records,
        has_examinable: examinable.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Subject,Mention,Name of Scientist,Gender,Type of Mention,Nationality,Region";

    fn parse(csv: &str) -> ParseResult {
        parse_str(csv, ',', "utf-8".to_string()).unwrap()
    }

    #[test]
    fn test_simple_csv() {
        let result = parse("name,age\nAlice,30\nBob,25");

        assert_eq!(result.headers, vec!["name", "age"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].values, vec!["Alice", "30"]);
        assert_eq!(result.rows[0].line, 2);
        assert_eq!(result.rows[1].line, 3);
    }

    #[test]
    fn test_quoted_values_keep_delimiters() {
        let result = parse("name,value\n\"Curie, Marie\",\"A;B\"");

        assert_eq!(result.rows[0].get(0), "Curie, Marie");
        assert_eq!(result.rows[0].get(1), "A;B");
    }

    #[test]
    fn test_empty_lines_skipped() {
        let result = parse("a,b\n1,2\n\n,\n3,4\n");
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[1].values, vec!["3", "4"]);
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let result = parse("a,b,c\n1");
        assert_eq!(result.rows[0].get(0), "1");
        assert_eq!(result.rows[0].get(2), "");
    }

    #[test]
    fn test_json_records() {
        let records = parse("a,b\n1,2").to_json_records();
        assert_eq!(records[0]["a"], "1");
        assert_eq!(records[0]["b"], "2");
    }

    #[test]
    fn test_empty_csv_error() {
        let result = parse_str("", ',', "utf-8".to_string());
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let result = parse_str("a§b", '§', "utf-8".to_string());
        assert!(matches!(result, Err(CsvError::InvalidDelimiter('§'))));
    }

    #[test]
    fn test_detect_delimiter_comma_over_inner_semicolons() {
        let content = format!("{}\nphysics,X,A;B,male;female,concept,n1;n2,r1;r2", HEADER);
        assert_eq!(detect_delimiter(&content), ',');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_detect_delimiter_defaults_to_comma() {
        assert_eq!(detect_delimiter("single"), ',');
    }

    #[test]
    fn test_detect_encoding_utf8() {
        assert_eq!(detect_encoding("Ørsted".as_bytes()), "utf-8");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Ampère" in ISO-8859-1
        let bytes: &[u8] = &[0x41, 0x6D, 0x70, 0xE8, 0x72, 0x65];
        assert_ne!(detect_encoding(bytes), "utf-8");
        let decoded = decode_content(bytes, "latin-1").unwrap();
        assert_eq!(decoded, "Ampère");
    }

    #[test]
    fn test_unknown_encoding_label() {
        let result = decode_content(b"abc", "not-an-encoding");
        assert!(matches!(result, Err(CsvError::Encoding(_))));
    }

    #[test]
    fn test_parse_bytes_latin1_names() {
        let mut bytes = format!("{}\nphysics,Law,Amp", HEADER).into_bytes();
        bytes.push(0xE8);
        bytes.extend_from_slice(b"re,male,concept,French,Europe\n");

        let parsed = parse_bytes(&bytes, Some("latin-1"), None).unwrap();
        assert_eq!(parsed.delimiter, ',');
        let table = mention_table(&parsed).unwrap();
        assert_eq!(table.records[0].scientists, "Ampère");
    }

    #[test]
    fn test_latin1_names_detected_without_explicit_encoding() {
        let text = format!(
            "{}\n\
             physics,Ampère's law,André-Marie Ampère,male,concept,French,Europe\n\
             physics,Electromagnetism,Hans Christian Ørsted,male,scientist,Danish,Europe\n\
             biology,Neuron doctrine,Santiago Ramón y Cajal,male,concept,Spanish,Europe\n\
             chemistry,Hückel's rule,Erich Hückel,male,concept,German,Europe\n",
            HEADER
        );
        let (bytes, _, unmappable) = encoding_rs::WINDOWS_1252.encode(&text);
        assert!(!unmappable);
        assert!(std::str::from_utf8(&bytes).is_err());

        let parsed = parse_bytes(&bytes, None, None).unwrap();
        assert_ne!(parsed.encoding, "utf-8");
        assert_eq!(parsed.delimiter, ',');

        let table = mention_table(&parsed).unwrap();
        let names: Vec<&str> = table.records.iter().map(|r| r.scientists.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "André-Marie Ampère",
                "Hans Christian Ørsted",
                "Santiago Ramón y Cajal",
                "Erich Hückel",
            ]
        );
        assert_eq!(table.records[0].mention, "Ampère's law");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let parsed = parse(&format!("{}\n physics , X , A ,male,concept,n1,r1", HEADER));
        let table = mention_table(&parsed).unwrap();

        assert_eq!(table.records[0].subject, "physics");
        assert_eq!(table.records[0].mention, "X");
        assert_eq!(table.records[0].scientists, "A");
    }

    #[test]
    fn test_mention_table_without_examinable() {
        let parsed = parse(&format!("{}\nphysics,X,A,male,concept,n1,r1", HEADER));
        let table = mention_table(&parsed).unwrap();

        assert!(!table.has_examinable);
        assert_eq!(table.records.len(), 1);
        let record = &table.records[0];
        assert_eq!(record.line, 2);
        assert_eq!(record.subject, "physics");
        assert_eq!(record.scientists, "A");
        assert_eq!(record.examinable, None);
    }

    #[test]
    fn test_mention_table_with_examinable_in_any_position() {
        let parsed = parse(
            "Examinable,Region,Nationality,Type of Mention,Gender,Name of Scientist,Mention,Subject\n\
             yes,r1,n1,scientist,female,B,Y,biology",
        );
        let table = mention_table(&parsed).unwrap();

        assert!(table.has_examinable);
        let record = &table.records[0];
        assert_eq!(record.subject, "biology");
        assert_eq!(record.genders, "female");
        assert_eq!(record.examinable.as_deref(), Some("yes"));
    }

    #[test]
    fn test_mention_table_missing_column() {
        let parsed = parse(
            "Subject,Mention,Name of Scientist,Gender,Type of Mention,Nationality\n\
             physics,X,A,male,concept,n1",
        );
        match mention_table(&parsed) {
            Err(CsvError::MissingColumn(col)) => assert_eq!(col, "Region"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }
}
