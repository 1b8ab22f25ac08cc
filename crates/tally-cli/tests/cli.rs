use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STATEMENT: &str = "거래명세서
거래처: 한우유통(주)
발행일:2024-03-05
소고기 등심 5 kg 50000 250000
양파 10 kg 2,000 20,000
합계:270,000원
";

/// Command isolated from the user's real configuration directory.
fn tally(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"));
    cmd
}

fn write(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn validate_accepts_invoice_image() {
    let dir = TempDir::new().unwrap();
    let image = write(&dir, "statement.jpg", &[0xff, 0xd8, 0xff]);

    tally(&dir)
        .args(["validate", "--kind", "invoice"])
        .arg(&image)
        .assert()
        .success()
        .stdout(predicate::str::contains("statement.jpg OK"));
}

#[test]
fn validate_rejects_csv_sales_export() {
    let dir = TempDir::new().unwrap();
    let csv = write(&dir, "daily.csv", b"a,b,c\n");

    tally(&dir)
        .args(["validate", "--kind", "sales"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("only .xlsx, .xls files can be uploaded"));
}

#[test]
fn validate_guesses_mime_from_extension() {
    let dir = TempDir::new().unwrap();
    let webp = write(&dir, "statement.webp", b"RIFF");
    let gif = write(&dir, "statement.gif", b"GIF89a");

    tally(&dir)
        .args(["validate", "--kind", "invoice"])
        .arg(&webp)
        .assert()
        .success();

    tally(&dir)
        .args(["validate", "--kind", "invoice"])
        .arg(&gif)
        .assert()
        .failure()
        .stderr(predicate::str::contains("supported file types"));
}

#[test]
fn sales_rejects_oversized_export_before_parsing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("daily.xlsx");
    // Sparse file: the size limit must trip before the decoder sees it
    fs::File::create(&path)
        .unwrap()
        .set_len(10 * 1024 * 1024 + 1)
        .unwrap();

    tally(&dir)
        .arg("sales")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("file size must be 10MB or less"))
        .stderr(predicate::str::contains("failed to read workbook").not());
}

#[test]
fn invoice_rejects_oversized_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("statement.jpg");
    fs::File::create(&path)
        .unwrap()
        .set_len(20 * 1024 * 1024 + 1)
        .unwrap();

    tally(&dir)
        .arg("invoice")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("file size must be 20MB or less"));
}

#[test]
fn validate_rejects_gif_invoice() {
    let dir = TempDir::new().unwrap();
    let gif = write(&dir, "statement.gif", b"GIF89a");

    tally(&dir)
        .args(["validate", "--kind", "invoice", "--mime", "image/gif"])
        .arg(&gif)
        .assert()
        .failure()
        .stderr(predicate::str::contains("supported file types"));
}

#[test]
fn sales_reports_unreadable_workbook() {
    let dir = TempDir::new().unwrap();
    let workbook = write(&dir, "daily.xlsx", b"not a workbook");

    tally(&dir)
        .arg("sales")
        .arg(&workbook)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read workbook"));
}

#[test]
fn invoice_from_transcript() {
    let dir = TempDir::new().unwrap();
    let image = write(&dir, "statement.png", &[0x89, b'P', b'N', b'G']);
    let transcript = write(&dir, "statement.txt", STATEMENT.as_bytes());

    tally(&dir)
        .arg("invoice")
        .arg(&image)
        .arg("--transcript")
        .arg(&transcript)
        .assert()
        .success()
        .stdout(predicate::str::contains("한우유통(주)"))
        .stdout(predicate::str::contains("2024-03-05"))
        .stdout(predicate::str::contains("소고기 등심"));
}

#[test]
fn invoice_rejects_pdf() {
    let dir = TempDir::new().unwrap();
    let pdf = write(&dir, "statement.pdf", b"%PDF-1.7");
    let transcript = write(&dir, "statement.txt", STATEMENT.as_bytes());

    tally(&dir)
        .arg("invoice")
        .arg(&pdf)
        .arg("--transcript")
        .arg(&transcript)
        .assert()
        .failure()
        .stderr(predicate::str::contains("please upload an image file"));
}

#[test]
fn approve_then_pl_report() {
    let dir = TempDir::new().unwrap();
    let extracted = write(
        &dir,
        "invoice.json",
        r#"{
            "vendor_name": "한우유통(주)",
            "issue_date": "2024-03-05",
            "total_amount": "45000",
            "line_items": [
                {"raw_item_name": "양파", "qty": 10.0, "uom": "kg", "unit_price": "2000", "line_total": "20000"},
                {"raw_item_name": "대파", "qty": 5.0, "uom": "ea", "unit_price": "5000", "line_total": "25000"}
            ]
        }"#.as_bytes(),
    );
    let sales = write(
        &dir,
        "sales.json",
        r#"[
            {"sale_date": "2024-03-01", "item_code": "A001", "item_name": "김치찌개", "qty": 3.0, "net_sales": "60000"},
            {"sale_date": "2024-03-20", "item_code": "A002", "item_name": "된장찌개", "qty": 2.0, "net_sales": "40000"}
        ]"#.as_bytes(),
    );
    let approved = dir.path().join("approved.json");

    tally(&dir)
        .arg("approve")
        .arg(&extracted)
        .args(["--map", "0=STD-ONION", "--date", "2024-03-06", "--output"])
        .arg(&approved)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 line(s) have no standard item"));

    let approval = fs::read_to_string(&approved).unwrap();
    assert!(approval.contains("\"status\": \"approved\""));
    assert!(approval.contains("\"std_item_id\": \"STD-ONION\""));
    assert!(approval.contains("\"reason\": \"inbound\""));

    tally(&dir)
        .args(["pl", "--period", "month", "--date", "2024-03-15", "--sales"])
        .arg(&sales)
        .arg("--invoices")
        .arg(&approved)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_revenue\": \"100000\""))
        .stdout(predicate::str::contains("\"total_cost\": \"45000\""))
        .stdout(predicate::str::contains("\"date_to\": \"2024-03-31\""));
}

#[test]
fn approve_rejects_unknown_line() {
    let dir = TempDir::new().unwrap();
    let extracted = write(
        &dir,
        "invoice.json",
        r#"{"vendor_name": "미확인", "issue_date": "2024-03-05", "total_amount": "0", "line_items": []}"#.as_bytes(),
    );

    tally(&dir)
        .arg("approve")
        .arg(&extracted)
        .args(["--map", "3=STD-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invoice has no line 3"));
}

#[test]
fn config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("tally.json");

    tally(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    tally(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "invoice.default_uom", "pc"])
        .assert()
        .success();

    tally(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "invoice.default_uom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pc\""));

    tally(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "sales.header_row", "not-a-number"])
        .assert()
        .failure();
}

#[test]
fn config_path_reports_missing_file() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));
}
