//! Loader tests against real files: every supported format, plus the
//! failure modes that must stop start-up.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;
use titanic_eda::{compute, load_file, Cell, ColumnKind, DataError, FilterSelection};

const CSV: &str = "\
PassengerId,Survived,Pclass,Sex,Age,SibSp,Parch,Fare,Embarked
1,0,3,male,22.0,1,0,7.25,S
2,1,1,female,38.0,1,0,71.2833,C
3,1,3,female,26.0,0,0,7.925,S
4,1,1,female,35.0,1,0,53.1,S
5,0,3,male,,0,0,8.05,
";

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn csv_with_n_rows_yields_n_records() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "cleaned_titanic.csv", CSV);

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 5);

    let names: Vec<&str> = ds.schema().names().collect();
    assert_eq!(
        names,
        ["PassengerId", "Survived", "Pclass", "Sex", "Age", "SibSp", "Parch", "Fare", "Embarked"]
    );
    assert_eq!(ds.schema().column("Age").unwrap().kind, ColumnKind::Float);
    assert_eq!(ds.schema().column("Sex").unwrap().kind, ColumnKind::Text);

    let last = &ds.records()[4];
    assert_eq!(last.index, 4);
    assert_eq!(last.sex, "male");
    assert_eq!(last.age, None);
    assert_eq!(last.embarked, None);
    assert_eq!(last.extra.get("PassengerId"), Some(&Cell::Integer(5)));
}

#[test]
fn nonexistent_path_is_missing_data_source() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cleaned_titanic.csv");

    match load_file(&path) {
        Err(DataError::MissingDataSource { path: missing }) => assert_eq!(missing, path),
        other => panic!("expected MissingDataSource, got {other:?}"),
    }
}

#[test]
fn missing_data_source_message_names_the_file() {
    let err = load_file(Path::new("no/such/cleaned_titanic.csv")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("not found"), "{message}");
    assert!(message.contains("cleaned_titanic.csv"), "{message}");
}

#[test]
fn tsv_is_read_with_tab_delimiter() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "titanic.tsv", &CSV.replace(',', "\t"));
    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 5);
    assert_eq!(ds.records()[1].fare, 71.2833);
}

#[test]
fn json_records_are_loaded() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "titanic.json",
        r#"[
            {"Survived": 0, "Pclass": 3, "Sex": "male", "Age": 22.0, "Fare": 7.25, "Embarked": "S"},
            {"Survived": true, "Pclass": 1, "Sex": "female", "Age": null, "Fare": 71.28, "Embarked": "C"}
        ]"#,
    );
    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 2);
    assert!(ds.records()[1].survived);
    assert_eq!(ds.records()[1].age, None);
    assert_eq!(ds.records()[0].embarked.as_deref(), Some("S"));
}

#[test]
fn json_must_be_an_array() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "titanic.json", r#"{"Sex": "male"}"#);
    assert!(matches!(load_file(&path), Err(DataError::Malformed(_))));
}

#[test]
fn parquet_columns_are_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("titanic.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("Survived", DataType::Boolean, false),
        Field::new("Pclass", DataType::Int32, false),
        Field::new("Sex", DataType::Utf8, false),
        Field::new("Age", DataType::Float64, true),
        Field::new("Fare", DataType::Float64, false),
        Field::new("Embarked", DataType::Utf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(BooleanArray::from(vec![false, true, true])),
        Arc::new(Int32Array::from(vec![3, 1, 2])),
        Arc::new(StringArray::from(vec!["male", "female", "female"])),
        Arc::new(Float64Array::from(vec![Some(22.0), None, Some(14.0)])),
        Arc::new(Float64Array::from(vec![7.25, 71.28, 30.07])),
        Arc::new(StringArray::from(vec![Some("S"), Some("C"), None])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.records()[2].pclass, 2);
    assert!(ds.records()[1].survived);
    assert_eq!(ds.records()[1].age, None);
    assert_eq!(ds.records()[2].embarked, None);
    assert_eq!(ds.schema().column("Survived").unwrap().kind, ColumnKind::Integer);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "titanic.xlsx", "not a table");
    assert!(matches!(load_file(&path), Err(DataError::UnsupportedFormat(ext)) if ext == "xlsx"));
}

#[test]
fn ragged_csv_is_a_csv_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "titanic.csv", "Sex,Pclass,Age,Fare,Embarked,Survived\nmale,3\n");
    assert!(matches!(load_file(&path), Err(DataError::Csv(_))));
}

#[test]
fn numerically_coded_embarked_is_correlated() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "coded.csv",
        "Survived,Pclass,Sex,Age,Fare,Embarked\n\
         0,3,male,22,7.25,0\n\
         1,1,female,38,71.28,1\n\
         1,3,female,26,7.92,0\n\
         0,3,male,35,8.05,2\n",
    );
    let ds = load_file(&path).unwrap();
    assert_eq!(ds.schema().column("Embarked").unwrap().kind, ColumnKind::Integer);

    let corr = compute(&ds, &FilterSelection::all()).summaries.correlation;
    assert_eq!(corr.columns(), ["Survived", "Pclass", "Age", "Fare", "Embarked"]);
    assert_eq!(corr.between("Embarked", "Embarked"), Some(1.0));
    assert!(corr.between("Embarked", "Fare").is_some());
}

#[test]
fn byte_order_mark_is_stripped_from_the_header() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bom.csv", "\u{feff}Sex,Pclass,Age,Fare,Embarked,Survived\nmale,3,22,7.25,S,0\n");
    let ds = load_file(&path).unwrap();
    assert_eq!(ds.schema().names().next(), Some("Sex"));
    assert_eq!(ds.records()[0].sex, "male");
}

#[test]
fn float_looking_text_keeps_its_spelling() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "tickets.csv",
        "Sex,Pclass,Age,Fare,Embarked,Survived,Ticket\n\
         male,3,22,7.25,S,0,113.50\n\
         female,1,38,71.28,C,1,PC 17599\n",
    );
    let ds = load_file(&path).unwrap();
    assert_eq!(ds.records()[0].extra.get("Ticket"), Some(&Cell::Text("113.50".into())));
}
