//! End-to-end tests of the `eicu-dashboard` binary.

use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

const PATIENTS: &str = "\
region,hospitalid,gender,ethnicity,agegroup,age,admissionweight,admissionheight,primarydiagnosis,\
hospitaladmittime24,actualhospitalmortality,predictedhospitalmortality,actualhospitallos,\
predictedhospitallos,actualiculos,predictediculos
Midwest,1,Female,Caucasian,70-79,70,64,160,Sepsis,08:00:00,EXPIRED,0.9,10,8,3,2
South,2,Male,Caucasian,40-49,40,90,180,Stroke,20:30:00,ALIVE,0.2,4,5,1,1.5
";

fn dashboard(args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_eicu-dashboard");
    Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run eicu-dashboard")
}

#[test]
fn missing_data_file_exits_with_error() {
    let output = dashboard(&["performance", "--data", "/nonexistent/patient.csv"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: load /nonexistent/patient.csv"), "{stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn unknown_region_exits_with_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", PATIENTS).unwrap();
    let path = file.path().to_str().unwrap();

    let output = dashboard(&["length-of-stay", "--data", path, "--region", "Nowhere"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: unknown region 'Nowhere'"), "{stderr}");
}

#[test]
fn known_region_prints_csv() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", PATIENTS).unwrap();
    let path = file.path().to_str().unwrap();

    let output = dashboard(&[
        "length-of-stay",
        "--data",
        path,
        "--region",
        "South",
        "--format",
        "csv",
    ]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("section,Region,Location,Mean (days),Stays\n"));
    assert!(stdout.contains("Mean length of stay by hospital in South,1,2,ICU,1,1"));
}
