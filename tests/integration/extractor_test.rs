use anyhow::Result;
use schemabot::schema::{
    extract_tables, ColumnDescriptor, DiagnosticKind, SplitMode, TableExtractor,
};

#[path = "../common/mod.rs"]
mod common;

fn tokens(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_text_without_create_table_yields_nothing() {
    assert!(extract_tables("").is_empty());
    assert!(extract_tables("SELECT * FROM bovedas; INSERT INTO precios VALUES (1);").is_empty());
    assert!(extract_tables("just some prose about tables").is_empty());
}

#[test]
fn test_reference_statement() {
    let tables = extract_tables("CREATE TABLE users (id INT PRIMARY KEY, name VARCHAR(255) NOT NULL);");

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name(), "users");
    assert_eq!(
        tables[0].columns(),
        &[
            ColumnDescriptor::new("id", "INT", tokens(&["PRIMARY", "KEY"])),
            ColumnDescriptor::new("name", "VARCHAR(255)", tokens(&["NOT", "NULL"])),
        ]
    );
}

#[test]
fn test_quoted_identifiers_are_normalized() {
    let tables = extract_tables("CREATE TABLE `pagos` (`id` INT, \"monto\" INT);\nCREATE TABLE \"precios\" (id INT);");

    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].name(), "pagos");
    assert_eq!(tables[0].columns()[0].name(), "id");
    assert_eq!(tables[0].columns()[1].name(), "monto");
    assert_eq!(tables[1].name(), "precios");
}

#[test]
fn test_tables_and_columns_keep_source_order() -> Result<()> {
    let tables = extract_tables(common::CEMETERY_SCHEMA);

    let names: Vec<_> = tables.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["bovedas", "usuarios", "reservas"]);

    let reservas: Vec<_> = tables[2].columns().iter().map(|c| c.name()).collect();
    assert_eq!(reservas, vec!["id", "boveda_id", "usuario_id"]);

    let estado = tables[0].column("estado").ok_or_else(|| anyhow::anyhow!("estado missing"))?;
    assert_eq!(estado.data_type(), "VARCHAR(20)");
    assert_eq!(estado.constraints(), tokens(&["DEFAULT", "'disponible'"]).as_slice());

    let email = tables[1].column("email").ok_or_else(|| anyhow::anyhow!("email missing"))?;
    assert_eq!(email.constraints(), tokens(&["NOT", "NULL", "UNIQUE"]).as_slice());

    Ok(())
}

#[test]
fn test_body_may_span_lines_and_match_stops_at_first_terminator() {
    let sql = "CREATE TABLE a (\n  x INT\n);\nCREATE TABLE b (\n  y INT\n);";
    let tables = extract_tables(sql);

    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].column_count(), 1);
    assert_eq!(tables[1].columns()[0].name(), "y");
}

#[test]
fn test_constraint_tokens_are_preserved_verbatim() {
    let tables = extract_tables("CREATE TABLE t (balance INT NOT NULL DEFAULT 0);");
    assert_eq!(
        tables[0].columns()[0].constraints(),
        tokens(&["NOT", "NULL", "DEFAULT", "0"]).as_slice()
    );
}

#[test]
fn test_decimal_type_is_split_in_naive_mode() {
    let sql = "CREATE TABLE precios (price DECIMAL(10,2) NOT NULL, tipo TEXT);";
    let extraction = TableExtractor::new(SplitMode::Naive).extract(sql);
    let columns = extraction.tables[0].columns();

    // The comma inside the type parameters starts a new fragment
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0], ColumnDescriptor::new("price", "DECIMAL(10", vec![]));
    assert_eq!(columns[1], ColumnDescriptor::new("2)", "NOT", tokens(&["NULL"])));
    assert_eq!(columns[2].name(), "tipo");
    assert!(extraction.is_clean());
}

#[test]
fn test_decimal_type_is_kept_in_depth_aware_mode() {
    let sql = "CREATE TABLE precios (price DECIMAL(10,2) NOT NULL, tipo TEXT);";
    let extraction = TableExtractor::new(SplitMode::DepthAware).extract(sql);
    let columns = extraction.tables[0].columns();

    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0], ColumnDescriptor::new("price", "DECIMAL(10,2)", tokens(&["NOT", "NULL"])));
    assert_eq!(columns[1], ColumnDescriptor::new("tipo", "TEXT", vec![]));
}

#[test]
fn test_default_mode_is_naive() {
    assert_eq!(TableExtractor::default().mode(), SplitMode::Naive);
}

#[test]
fn test_column_without_type_is_kept_with_diagnostic() {
    let extraction = TableExtractor::default().extract("CREATE TABLE t (id INT, PRIMARY);");

    assert_eq!(extraction.tables[0].column_count(), 2);
    assert_eq!(extraction.tables[0].columns()[1].data_type(), "");
    assert_eq!(extraction.diagnostics.len(), 1);
    assert_eq!(extraction.diagnostics[0].kind, DiagnosticKind::MissingType);
    assert_eq!(extraction.diagnostics[0].table, "t");
    assert_eq!(extraction.diagnostics[0].fragment, "PRIMARY");
}

#[test]
fn test_empty_body_yields_table_without_columns() {
    let extraction = TableExtractor::default().extract("CREATE TABLE vacia ();");

    assert_eq!(extraction.tables.len(), 1);
    assert_eq!(extraction.tables[0].column_count(), 0);
    assert_eq!(extraction.diagnostics[0].kind, DiagnosticKind::EmptyFragment);
}

#[test]
fn test_extraction_serializes_with_type_field() -> Result<()> {
    let tables = extract_tables("CREATE TABLE users (id INT PRIMARY KEY);");
    let json = serde_json::to_value(&tables)?;

    assert_eq!(json[0]["name"], "users");
    assert_eq!(json[0]["columns"][0]["type"], "INT");
    assert_eq!(json[0]["columns"][0]["constraints"][1], "KEY");
    Ok(())
}

#[test]
fn test_concurrent_extraction() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| extract_tables(common::CEMETERY_SCHEMA).len()))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
}
