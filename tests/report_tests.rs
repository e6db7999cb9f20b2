use get_papers::report::{render_table, save_csv, write_csv, ReportRow, HEADERS};
use get_papers::{ArticleRecord, NonAcademicAuthor};
use tempfile::TempDir;

fn record(pmid: &str, authors: &[(&str, &str)]) -> ArticleRecord {
    ArticleRecord {
        pmid: pmid.to_string(),
        title: format!("Title {}", pmid),
        publication_date: "2024-03".to_string(),
        authors: authors
            .iter()
            .map(|(name, affiliation)| NonAcademicAuthor {
                name: name.to_string(),
                affiliation: affiliation.to_string(),
            })
            .collect(),
        corresponding_email: "j@acme.com".to_string(),
    }
}

#[test]
fn test_report_row_joins_authors_and_affiliations() {
    let rec = record("1", &[("Jane Doe", "Acme Inc"), ("John Roe", "Beta LLC")]);

    let row = ReportRow::from(&rec);

    assert_eq!(row.authors, "Jane Doe, John Roe");
    assert_eq!(row.affiliations, "Acme Inc, Beta LLC");
    assert_eq!(row.email, "j@acme.com");
}

#[test]
fn test_write_csv_has_fixed_headers_and_quotes_commas() {
    let records = vec![record("1", &[("Jane Doe", "Acme Inc, Boston")])];
    let mut buf = Vec::new();

    write_csv(&records, &mut buf).unwrap();

    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "PubmedID,Title,Publication Date,Non-academic Author(s),Company Affiliation(s),Corresponding Author Email"
    );
    assert_eq!(
        lines.next().unwrap(),
        "1,Title 1,2024-03,Jane Doe,\"Acme Inc, Boston\",j@acme.com"
    );
    assert!(lines.next().is_none());
}

#[test]
fn test_save_csv_reads_back_rows() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out.csv");
    let records = vec![
        record("1", &[("Jane Doe", "Acme Inc")]),
        record("2", &[("John Roe", "Beta LLC"), ("Ann Poe", "Gamma GmbH")]),
    ];

    save_csv(&records, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, HEADERS.to_vec());

    let rows: Vec<ReportRow> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].authors, "John Roe, Ann Poe");
    assert_eq!(rows[1].affiliations, "Beta LLC, Gamma GmbH");
}

#[test]
fn test_save_csv_to_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("out.csv");

    assert!(save_csv(&[record("1", &[("A", "B")])], &path).is_err());
}

#[test]
fn test_render_table_aligns_columns() {
    let records = vec![
        record("1", &[("Jane Doe", "Acme Inc")]),
        record("22", &[("Jo", "Beta")]),
    ];

    let table = render_table(&records);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("PubmedID  Title"));
    assert!(lines[1].starts_with("--------  -------"));
    assert!(lines[2].starts_with("1         Title 1 "));
    assert!(lines[3].starts_with("22        Title 22"));

    // Every column starts at the same offset on every line
    let offset = lines[0].find("Publication Date").unwrap();
    assert_eq!(&lines[2][offset..offset + 7], "2024-03");
    assert_eq!(&lines[3][offset..offset + 7], "2024-03");
}
