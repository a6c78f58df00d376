use dynacard_config::load_card_csv;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("temp file");
    f.write_all(contents.as_bytes()).expect("write");
    f
}

#[test]
fn loads_well_formed_card() {
    let f = write_csv("Displacement,Rod Load\n0.0,1250.0\n12.5,4830.0\n25.0,5120.5\n");
    let card = load_card_csv(f.path()).expect("load");
    assert_eq!(card.displacement, vec![0.0, 12.5, 25.0]);
    assert_eq!(card.load, vec![1250.0, 4830.0, 5120.5]);
}

#[test]
fn rejects_wrong_headers() {
    let f = write_csv("Position,Load\n0.0,1250.0\n");
    let err = load_card_csv(f.path()).expect_err("should reject");
    let msg = format!("{err}");
    assert!(msg.contains("Displacement,Rod Load"), "got: {msg}");
    assert!(msg.contains("Position,Load"), "got: {msg}");
}

#[test]
fn rejects_reordered_headers() {
    let f = write_csv("Rod Load,Displacement\n1250.0,0.0\n");
    assert!(load_card_csv(f.path()).is_err());
}

#[test]
fn rejects_non_numeric_row_with_line_number() {
    let f = write_csv("Displacement,Rod Load\n0.0,1250.0\ntwelve,4830.0\n");
    let err = load_card_csv(f.path()).expect_err("should reject");
    assert!(format!("{err}").contains("row 3"), "got: {err}");
}

#[test]
fn rejects_non_finite_values() {
    let f = write_csv("Displacement,Rod Load\n0.0,NaN\n");
    let err = load_card_csv(f.path()).expect_err("should reject");
    assert!(format!("{err}").contains("non-finite"), "got: {err}");

    let f = write_csv("Displacement,Rod Load\ninf,100.0\n");
    assert!(load_card_csv(f.path()).is_err());
}

#[test]
fn rejects_header_only_file() {
    let f = write_csv("Displacement,Rod Load\n");
    let err = load_card_csv(f.path()).expect_err("should reject");
    assert!(format!("{err}").contains("no data rows"), "got: {err}");
}

#[test]
fn rejects_missing_file() {
    let err =
        load_card_csv(std::path::Path::new("/nonexistent/card.csv")).expect_err("should reject");
    assert!(format!("{err}").contains("open card CSV"), "got: {err}");
}

#[test]
fn rejects_ragged_row() {
    let f = write_csv("Displacement,Rod Load\n0.0,1250.0\n1.0\n");
    assert!(load_card_csv(f.path()).is_err());
}
