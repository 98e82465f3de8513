use std::path::PathBuf;
use std::process::Command;

fn cli_exe() -> &'static str {
    env!("CARGO_BIN_EXE_asnval")
}

fn unique_temp_path(prefix: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("{prefix}-{nonce}"));
    path
}

fn clean_notice() -> String {
    [
        "ISA*00*          *00*          *ZZ*WMTIN-REL100  *ZZ*WALMARTIN     *240314*2200*U*00401*000000905*0*P*>",
        "GS*SH*WMTIN-REL100*WALMARTIN*20240314*2200*905*X*004010",
        "ST*856*0001",
        "BSN*00*SHP20240315*20240314*2200",
        "DTM*137*20240314*2200",
        "DTM*011*20240315*0800",
        "HL*1**S",
        "REF*TJ*27AAPFU0939F1ZV",
        "LIN*1*UP*12345678901231",
        "SN1*1*10*EA",
        "CERT*VENDOR_SIGNING*20240414",
        "SE*10*0001",
        "GE*1*905",
        "IEA*1*000000905",
    ]
    .join("\n")
}

fn write_notice(prefix: &str, contents: &str) -> PathBuf {
    let path = unique_temp_path(prefix);
    std::fs::write(&path, contents).expect("write notice fixture");
    path
}

#[test]
fn validate_reports_ready_for_a_clean_notice() {
    let notice = write_notice("asn-clean", &clean_notice());
    let output = Command::new(cli_exe())
        .args([
            "validate",
            "--file",
            notice.to_str().unwrap(),
            "--today",
            "2024-03-15",
        ])
        .output()
        .expect("run validate command");

    assert!(
        output.status.success(),
        "validate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("status: ready"));

    let _ = std::fs::remove_file(notice);
}

#[test]
fn validate_exits_nonzero_when_not_ready() {
    let broken = clean_notice().replace("\nIEA*1*000000905", "");
    let notice = write_notice("asn-broken", &broken);
    let output = Command::new(cli_exe())
        .args([
            "validate",
            "--file",
            notice.to_str().unwrap(),
            "--today",
            "2024-03-15",
        ])
        .output()
        .expect("run validate command");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("status: not_ready"));
    assert!(stdout.contains("STRUCT_SEGMENT_MISSING"));

    let _ = std::fs::remove_file(notice);
}

#[test]
fn validate_emits_machine_readable_json() {
    let notice = write_notice("asn-json", &clean_notice());
    let output = Command::new(cli_exe())
        .args([
            "validate",
            "--file",
            notice.to_str().unwrap(),
            "--today",
            "2024-03-15",
            "--json",
        ])
        .output()
        .expect("run validate command");

    assert!(output.status.success());
    let report = serde_json::from_slice::<serde_json::Value>(&output.stdout)
        .expect("parse json report");
    assert_eq!(report["status"], "ready");
    assert_eq!(report["error_count"], 0);
    assert!(report["findings"].as_array().unwrap().is_empty());

    let _ = std::fs::remove_file(notice);
}

#[test]
fn skip_flag_disables_a_checker() {
    // Expired certificate against the pinned reference date.
    let expired = clean_notice().replace("20240414", "20240301");
    let notice = write_notice("asn-skip", &expired);

    let blocked = Command::new(cli_exe())
        .args([
            "validate",
            "--file",
            notice.to_str().unwrap(),
            "--today",
            "2024-03-15",
        ])
        .output()
        .expect("run validate command");
    assert_eq!(blocked.status.code(), Some(1));

    let skipped = Command::new(cli_exe())
        .args([
            "validate",
            "--file",
            notice.to_str().unwrap(),
            "--today",
            "2024-03-15",
            "--skip",
            "certificate",
        ])
        .output()
        .expect("run validate command");
    assert!(
        skipped.status.success(),
        "skip run failed: {}",
        String::from_utf8_lossy(&skipped.stderr)
    );

    let _ = std::fs::remove_file(notice);
}

#[test]
fn unknown_skip_name_is_rejected() {
    let notice = write_notice("asn-skip-bad", &clean_notice());
    let output = Command::new(cli_exe())
        .args([
            "validate",
            "--file",
            notice.to_str().unwrap(),
            "--skip",
            "telemetry",
        ])
        .output()
        .expect("run validate command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown checker name"));

    let _ = std::fs::remove_file(notice);
}

#[test]
fn validate_accepts_a_catalog_file() {
    let catalog = unique_temp_path("asn-catalog");
    std::fs::write(
        &catalog,
        r#"{"entries": {"12345678901231": {"name": "Wireless Mouse", "category": "Electronics"}}}"#,
    )
    .expect("write catalog fixture");
    let notice = write_notice("asn-with-catalog", &clean_notice());

    let output = Command::new(cli_exe())
        .args([
            "validate",
            "--file",
            notice.to_str().unwrap(),
            "--catalog",
            catalog.to_str().unwrap(),
            "--today",
            "2024-03-15",
        ])
        .output()
        .expect("run validate command");
    assert!(
        output.status.success(),
        "catalog run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let _ = std::fs::remove_file(catalog);
    let _ = std::fs::remove_file(notice);
}

#[test]
fn parse_dumps_the_segment_table() {
    let notice = write_notice("asn-parse", &clean_notice());
    let output = Command::new(cli_exe())
        .args(["parse", "--file"])
        .arg(&notice)
        .output()
        .expect("run parse command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ISA"));
    assert!(stdout.contains("IEA"));
    assert_eq!(stdout.lines().count(), 14);

    let _ = std::fs::remove_file(notice);
}
