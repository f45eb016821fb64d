use duckdb::Connection;
use pulse_analytics::analysis::{run_query, INSIGHTS};
use pulse_analytics::commands::{
    execute_extract, execute_load, ExtractArgs, LoadArgs,
};
use pulse_analytics::dashboard;
use std::fs;
use std::path::Path;

fn write_leaf(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Build a small but complete raw tree covering every subject
fn build_raw_tree(data_dir: &Path) {
    let agg_txn = data_dir.join("aggregated/transaction/country/india/state");
    write_leaf(
        &agg_txn.join("goa/2021/1.json"),
        r#"{"data": {"transactionData": [
            {"name": "Peer-to-peer payments", "paymentInstruments": [
                {"type": "TOTAL", "count": 100, "amount": 50000000.0}
            ]},
            {"name": "Recharge & bill payments", "paymentInstruments": [
                {"type": "TOTAL", "count": 40, "amount": 10000000.0}
            ]}
        ]}}"#,
    );
    write_leaf(
        &agg_txn.join("goa/2022/1.json"),
        r#"{"data": {"transactionData": [
            {"name": "Peer-to-peer payments", "paymentInstruments": [
                {"type": "TOTAL", "count": 300, "amount": 150000000.0}
            ]}
        ]}}"#,
    );
    write_leaf(
        &agg_txn.join("kerala/2021/1.json"),
        r#"{"data": {"transactionData": [
            {"name": "Merchant payments", "paymentInstruments": [
                {"type": "TOTAL", "count": 50, "amount": 30000000.0}
            ]}
        ]}}"#,
    );
    // Zero baseline year, then growth: growth_pct must be NULL, not an error
    write_leaf(
        &agg_txn.join("zeroland/2021/1.json"),
        r#"{"data": {"transactionData": [
            {"name": "Merchant payments", "paymentInstruments": [
                {"type": "TOTAL", "count": 0, "amount": 0.0}
            ]}
        ]}}"#,
    );
    write_leaf(
        &agg_txn.join("zeroland/2022/1.json"),
        r#"{"data": {"transactionData": [
            {"name": "Merchant payments", "paymentInstruments": [
                {"type": "TOTAL", "count": 5, "amount": 1000.0}
            ]}
        ]}}"#,
    );

    let agg_user = data_dir.join("aggregated/user/country/india/state");
    write_leaf(
        &agg_user.join("goa/2021/1.json"),
        r#"{"data": {"hoverData": {
            "north goa district": {"registeredUsers": 4000, "appOpens": 9000},
            "south goa district": {"registeredUsers": 2000, "appOpens": 1000}
        }}}"#,
    );

    let map_txn = data_dir.join("map/transaction/hover/country/india/state");
    write_leaf(
        &map_txn.join("goa/2021/1.json"),
        r#"{"data": {"hoverDataList": [
            {"name": "north goa district", "metric": [{"count": 80, "amount": 40000000.0}]},
            {"name": "south goa district", "metric": [{"count": 20, "amount": 10000000.0}]}
        ]}}"#,
    );

    let map_user = data_dir.join("map/user/hover/country/india/state");
    write_leaf(
        &map_user.join("goa/2021/1.json"),
        r#"{"data": {"hoverData": {
            "north goa district": {"registeredUsers": 4000, "appOpens": 9000}
        }}}"#,
    );

    let top_txn = data_dir.join("top/transaction/country/india/state");
    write_leaf(
        &top_txn.join("goa/2021/1.json"),
        r#"{"data": {
            "districts": [{"entityName": "north goa", "metric": {"count": 60, "amount": 35000000.0}}],
            "pincodes": [{"entityName": "403001", "metric": {"count": 30, "amount": 15000000.0}}]
        }}"#,
    );

    let top_user = data_dir.join("top/user/country/india");
    write_leaf(
        &top_user.join("2021/1.json"),
        r#"{"data": {"pincodes": [
            {"entityName": "403001", "metric": {"registeredUsers": 1234}}
        ]}}"#,
    );
}

fn run_pipeline(base: &Path) -> Connection {
    let data_dir = base.join("raw");
    let out_dir = base.join("processed");
    let db_path = base.join("db/pulse.duckdb");

    build_raw_tree(&data_dir);

    let summary = execute_extract(&ExtractArgs {
        data_dir,
        out_dir: out_dir.clone(),
        unit: None,
    })
    .unwrap();
    assert_eq!(summary.subjects.len(), 7);

    let report = execute_load(&LoadArgs {
        processed_dir: out_dir,
        db_path: db_path.clone(),
    })
    .unwrap();
    assert_eq!(report.loaded.len(), 7);
    assert!(report.skipped.is_empty());

    Connection::open(&db_path).unwrap()
}

#[test]
fn test_extract_load_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let conn = run_pipeline(dir.path());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM aggregated_transactions", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(count, 6);

    let users: i64 = conn
        .query_row("SELECT COUNT(*) FROM aggregated_users", [], |row| row.get(0))
        .unwrap();
    assert_eq!(users, 2);

    let top_users: i64 = conn
        .query_row("SELECT COUNT(*) FROM top_users", [], |row| row.get(0))
        .unwrap();
    assert_eq!(top_users, 1);
}

#[test]
fn test_summary_counts_match_csv_rows() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("raw");
    let out_dir = dir.path().join("processed");
    build_raw_tree(&data_dir);

    let summary = execute_extract(&ExtractArgs {
        data_dir,
        out_dir: out_dir.clone(),
        unit: None,
    })
    .unwrap();

    for subject in &summary.subjects {
        let csv_path = out_dir.join(format!("{}.csv", subject.subject));
        let rows = fs::read_to_string(&csv_path)
            .unwrap()
            .lines()
            .count()
            .saturating_sub(1); // header
        assert_eq!(rows, subject.records, "{}", subject.subject);
    }
}

#[test]
fn test_repeat_extraction_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("raw");
    build_raw_tree(&data_dir);

    let first = dir.path().join("first");
    let second = dir.path().join("second");
    for out_dir in [&first, &second] {
        execute_extract(&ExtractArgs {
            data_dir: data_dir.clone(),
            out_dir: out_dir.clone(),
            unit: None,
        })
        .unwrap();
    }

    for entry in fs::read_dir(&first).unwrap() {
        let name = entry.unwrap().file_name();
        if name.to_string_lossy().ends_with(".csv") {
            assert_eq!(
                fs::read(first.join(&name)).unwrap(),
                fs::read(second.join(&name)).unwrap(),
                "{:?} differs between runs",
                name
            );
        }
    }
}

#[test]
fn test_reload_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("raw");
    let out_dir = dir.path().join("processed");
    let db_path = dir.path().join("pulse.duckdb");
    build_raw_tree(&data_dir);

    execute_extract(&ExtractArgs {
        data_dir,
        out_dir: out_dir.clone(),
        unit: None,
    })
    .unwrap();

    let args = LoadArgs {
        processed_dir: out_dir,
        db_path: db_path.clone(),
    };
    execute_load(&args).unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let snapshot = |conn: &Connection| {
        run_query(
            conn,
            "SELECT * FROM aggregated_transactions ORDER BY state, year, quarter, transaction_type, count",
            &[],
        )
        .unwrap()
    };
    let before = snapshot(&conn);
    drop(conn);

    execute_load(&args).unwrap();
    let conn = Connection::open(&db_path).unwrap();
    assert_eq!(snapshot(&conn), before);
}

#[test]
fn test_all_insights_run_against_store() {
    let dir = tempfile::tempdir().unwrap();
    let conn = run_pipeline(dir.path());

    let state = "goa".to_string();
    for insight in INSIGHTS {
        let result = if insight.needs_state {
            run_query(&conn, insight.sql, &[&state]).unwrap()
        } else {
            run_query(&conn, insight.sql, &[]).unwrap()
        };
        assert!(!result.columns.is_empty(), "{}", insight.name);
    }
}

#[test]
fn test_zero_baseline_growth_yields_null_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let conn = run_pipeline(dir.path());

    let growth = INSIGHTS.iter().find(|i| i.name == "state-growth").unwrap();
    let result = run_query(&conn, growth.sql, &[]).unwrap();

    // zeroland's baseline year sums to zero, so its growth is NULL and
    // the HAVING clause filters it out
    let states: Vec<String> = result
        .rows
        .iter()
        .map(|row| row[0].as_str().unwrap().to_string())
        .collect();
    assert!(states.contains(&"goa".to_string()));
    assert!(!states.contains(&"zeroland".to_string()));
}

#[test]
fn test_dashboard_views_run_against_store() {
    let dir = tempfile::tempdir().unwrap();
    let conn = run_pipeline(dir.path());

    let top_states = dashboard::top_states_by_amount(&conn).unwrap();
    assert_eq!(top_states.rows[0][0].as_str(), Some("goa"));

    let txn_types = dashboard::transaction_types(&conn, 2021, "goa").unwrap();
    assert_eq!(txn_types.rows.len(), 2);

    let opens = dashboard::app_opens_trend(&conn).unwrap();
    assert_eq!(opens.rows.len(), 1);

    let pincodes = dashboard::top_pincodes(&conn).unwrap();
    assert_eq!(pincodes.rows[0][0].as_str(), Some("403001"));

    let recharge = dashboard::recharge_trend(&conn).unwrap();
    assert_eq!(recharge.rows.len(), 1);

    let rendered = dashboard::render_table(&top_states);
    assert!(rendered.contains("state"));
    assert!(rendered.contains("goa"));
}
