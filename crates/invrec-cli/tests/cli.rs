//! End-to-end tests for the invrec binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn invrec() -> Command {
    Command::cargo_bin("invrec").unwrap()
}

fn write_order(dir: &std::path::Path, qty: u32) -> std::path::PathBuf {
    write_document(dir, "order.json", "ORDER", qty)
}

fn write_invoice(dir: &std::path::Path, qty: u32) -> std::path::PathBuf {
    write_document(dir, "invoice.json", "INVOICE", qty)
}

fn write_document(
    dir: &std::path::Path,
    file: &str,
    doc_type: &str,
    qty: u32,
) -> std::path::PathBuf {
    let path = dir.join(file);
    let json = format!(
        r#"{{
  "id": "00000000-0000-4000-8000-00000000000{}",
  "type": "{}",
  "created_at": "2024-03-01T12:00:00Z",
  "items": [
    {{ "name": "Box", "quantity": "{}", "unit_price": "5", "vat_percent": "18" }}
  ]
}}"#,
        if doc_type == "ORDER" { 1 } else { 2 },
        doc_type,
        qty
    );
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_help_runs() {
    invrec().arg("--help").assert().success();
}

#[test]
fn test_extract_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.txt");
    std::fs::write(
        &input,
        "ACME SUPPLIES LTD\nInvoice #INV-2024-001\nItem Qty Price Amount\nWidget A 2 49.99 99.98\nTotal: 99.98 USD\n",
    )
    .unwrap();

    invrec()
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-2024-001"));
}

#[test]
fn test_extract_low_confidence_defers_to_manual_entry() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.txt");
    std::fs::write(&input, "Invoice #42\nWidget A 2 49.99 99.98\n").unwrap();

    invrec()
        .arg("extract")
        .arg(&input)
        .args(["--confidence", "10"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Manual entry needed"));
}

#[test]
fn test_extract_missing_input_fails() {
    invrec()
        .args(["extract", "no-such-file.txt"])
        .assert()
        .failure();
}

#[test]
fn test_reconcile_matching_pair_is_valid() {
    let dir = tempfile::tempdir().unwrap();
    let order = write_order(dir.path(), 10);
    let invoice = write_invoice(dir.path(), 10);

    invrec()
        .arg("reconcile")
        .arg("--order")
        .arg(&order)
        .arg("--invoice")
        .arg(&invoice)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid").and(predicate::str::contains("error").not()));
}

#[test]
fn test_reconcile_quantity_mismatch_reports_findings() {
    let dir = tempfile::tempdir().unwrap();
    let order = write_order(dir.path(), 10);
    let invoice = write_invoice(dir.path(), 12);

    invrec()
        .arg("reconcile")
        .arg("--order")
        .arg(&order)
        .arg("--invoice")
        .arg(&invoice)
        .assert()
        .success()
        .stdout(predicate::str::contains("Quantity mismatch"));
}

#[test]
fn test_reconcile_csv_output() {
    let dir = tempfile::tempdir().unwrap();
    let order = write_order(dir.path(), 10);
    let invoice = write_invoice(dir.path(), 12);

    invrec()
        .arg("reconcile")
        .arg("--order")
        .arg(&order)
        .arg("--invoice")
        .arg(&invoice)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("category,severity,message"));
}

#[test]
fn test_reconcile_rejects_type_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let order = write_order(dir.path(), 10);
    let invoice = write_invoice(dir.path(), 10);

    // Swapped on purpose.
    invrec()
        .arg("reconcile")
        .arg("--order")
        .arg(&invoice)
        .arg("--invoice")
        .arg(&order)
        .assert()
        .failure();
}
