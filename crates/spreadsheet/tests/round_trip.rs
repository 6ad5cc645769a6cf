use chrono::NaiveDate;
use stockfilter_core::{CellValue, FilterError, Row, Table};
use stockfilter_rules::{process, FilterConfig};
use stockfilter_spreadsheet::{
    read_csv, read_table, read_xlsx_bytes, save_output, write_xlsx, ReadOptions, SpreadsheetError,
};

fn export() -> Table {
    let rows = vec![
        Row::new(vec![
            CellValue::text("XYZ.02"),
            CellValue::text("Parafuso"),
            CellValue::Int(-4),
            CellValue::text("Depósito B"),
            CellValue::Float(12.5),
        ]),
        Row::new(vec![
            CellValue::text("ABC.99"),
            CellValue::text("Coladur X"),
            CellValue::Int(-5),
            CellValue::text("Depósito A"),
            CellValue::Float(1.25),
        ]),
        Row::new(vec![
            CellValue::text("973473.L1"),
            CellValue::text("FortBio 1008"),
            CellValue::Int(-3),
            CellValue::Empty,
            CellValue::Float(3.0),
        ]),
        Row::new(vec![
            CellValue::text("AE5.12"),
            CellValue::text("Widget"),
            CellValue::Int(-10),
            CellValue::text("Depósito A"),
            CellValue::Float(0.5),
        ]),
        Row::new(vec![
            CellValue::text("XYZ.01"),
            CellValue::text("Widget"),
            CellValue::Int(7),
            CellValue::text("Depósito C"),
            CellValue::Float(2.75),
        ]),
    ];
    Table::new(
        &[
            "Nº do Item ",
            " Descrição",
            "Quantidade Disponível",
            "Armazém",
            "Custo",
        ],
        rows,
    )
    .unwrap()
}

#[test]
fn workbook_survives_filter_and_round_trip() {
    let input = read_xlsx_bytes(&write_xlsx(&export()).unwrap(), None).unwrap();
    assert_eq!(input.len(), 5);
    assert_eq!(input.rows()[0].get(2), &CellValue::Int(-4));

    let outcome = process(input, &FilterConfig::default()).unwrap();
    let bytes = write_xlsx(&outcome.table).unwrap();
    let output = read_xlsx_bytes(&bytes, Some("Sheet1")).unwrap();

    assert_eq!(
        output.columns(),
        [
            "Nº do Item",
            "Descrição",
            "Quantidade Disponível",
            "Armazém",
            "Custo"
        ]
    );

    let codes: Vec<String> = output.rows().iter().map(|r| r.get(0).to_string()).collect();
    assert_eq!(codes, ["973473.L1", "XYZ.02"]);

    for row in output.rows() {
        assert!(row.get(1).is_empty());
        assert!(row.get(2).as_f64().unwrap() > 0.0);
    }
    assert_eq!(output.rows()[0].get(2), &CellValue::Int(3));
    assert_eq!(output.rows()[1].get(3), &CellValue::text("Depósito B"));
    assert_eq!(output.rows()[1].get(4), &CellValue::Float(12.5));
}

#[test]
fn files_on_disk_are_read_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    let path = save_output(dir.path(), date, &write_xlsx(&export()).unwrap()).unwrap();

    let table = read_table(&path, &ReadOptions::default()).unwrap();
    assert_eq!(table.len(), 5);

    let csv_path = dir.path().join("estoque.csv");
    std::fs::write(
        &csv_path,
        "Nº do Item,Descrição,Quantidade Disponível\nABC.01,x,-2\nABC.00,y,-1\n",
    )
    .unwrap();
    let outcome = process(
        read_table(&csv_path, &ReadOptions::default()).unwrap(),
        &FilterConfig::default(),
    )
    .unwrap();
    let codes: Vec<String> = outcome
        .table
        .rows()
        .iter()
        .map(|r| r.get(0).to_string())
        .collect();
    assert_eq!(codes, ["ABC.00", "ABC.01"]);
}

#[test]
fn unknown_sheet_lists_available_ones() {
    let bytes = write_xlsx(&export()).unwrap();
    let err = read_xlsx_bytes(&bytes, Some("Estoque")).unwrap_err();
    match err {
        SpreadsheetError::SheetNotFound { name, available } => {
            assert_eq!(name, "Estoque");
            assert_eq!(available, ["Sheet1"]);
        }
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
}

#[test]
fn export_without_required_columns_is_rejected() {
    let table = Table::new(
        &["Código", "Quantidade Disponível"],
        vec![Row::new(vec![CellValue::text("ABC.1"), CellValue::Int(-1)])],
    )
    .unwrap();
    let input = read_xlsx_bytes(&write_xlsx(&table).unwrap(), None).unwrap();
    let err = process(input, &FilterConfig::default()).unwrap_err();
    assert_eq!(
        err,
        FilterError::MissingColumns(vec!["Nº do Item".to_string(), "Descrição".to_string()])
    );
}

#[test]
fn repeated_pass_through_headers_do_not_abort_the_run() {
    let data = "Nº do Item,Descrição,Quantidade Disponível,Obs,Obs\nABC.01,x,-2,a,b\n";
    let outcome = process(read_csv(data.as_bytes(), b',').unwrap(), &FilterConfig::default()).unwrap();

    assert_eq!(outcome.table.columns()[3..], ["Obs", "Obs.1"]);
    assert_eq!(outcome.table.len(), 1);
    let row = &outcome.table.rows()[0];
    assert_eq!(row.get(2), &CellValue::Int(2));
    assert_eq!(row.get(4), &CellValue::text("b"));
}

#[test]
fn non_finite_quantities_abort_the_run() {
    let data = "Nº do Item,Descrição,Quantidade Disponível\nABC.01,x,-inf\nABC.02,y,NaN\n";
    let err = process(read_csv(data.as_bytes(), b',').unwrap(), &FilterConfig::default()).unwrap_err();
    assert_eq!(err, FilterError::non_numeric_quantity(2, "-inf"));
}

#[test]
fn type_errors_point_at_the_worksheet_line() {
    let table = Table::new(
        &["Nº do Item", "Descrição", "Quantidade Disponível"],
        vec![
            Row::new(vec![CellValue::Empty, CellValue::Empty, CellValue::Empty]),
            Row::new(vec![
                CellValue::text("ABC.01"),
                CellValue::text("x"),
                CellValue::text("abc"),
            ]),
        ],
    )
    .unwrap();
    let input = read_xlsx_bytes(&write_xlsx(&table).unwrap(), None).unwrap();
    assert_eq!(input.len(), 1);

    let err = process(input, &FilterConfig::default()).unwrap_err();
    assert_eq!(err, FilterError::non_numeric_quantity(3, "abc"));
}
