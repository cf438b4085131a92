use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn command_calc_basic() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("distances.csv");

    let mut cmd = Command::cargo_bin("enzdist")?;
    cmd.arg("calc-distances")
        .arg("--enzyme-file")
        .arg("tests/calc/enzyme_sites.csv")
        .arg("--integration-file")
        .arg("tests/calc/integration_sites.csv")
        .arg("--output")
        .arg(&output)
        .output()?;

    let text = std::fs::read_to_string(&output)?;
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 5);
    // enzyme columns follow enzyme-file discovery order
    assert_eq!(
        lines[0],
        "IntegrationSite#,Chromosome,Position,\
         EcoRI UpstreamDist,EcoRI DownstreamDist,\
         BamHI UpstreamDist,BamHI DownstreamDist,\
         XhoI UpstreamDist,XhoI DownstreamDist"
    );
    assert_eq!(
        lines[1],
        "site1,chr1,300,200,200,50,500,not available,not available"
    );
    // position 100 sits exactly on an EcoRI cut site: upstream excluded,
    // downstream still found
    assert_eq!(
        lines[2],
        "site2,chr1,100,not available,400,not available,150,not available,not available"
    );
    assert_eq!(
        lines[3],
        "site3,chr2,5000,4000,not available,not available,not available,1000,1000"
    );
    // chr3 is unknown to every enzyme
    assert_eq!(
        lines[4],
        "site4,chr3,42,not available,not available,not available,not available,\
         not available,not available"
    );

    Ok(())
}

#[test]
fn command_calc_stdout() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("enzdist")?;
    let output = cmd
        .arg("calc-distances")
        .arg("--enzyme-file")
        .arg("tests/calc/enzyme_sites.csv")
        .arg("--integration-file")
        .arg("tests/calc/integration_sites.csv")
        .arg("--output")
        .arg("stdout")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.starts_with("IntegrationSite#,Chromosome,Position,EcoRI UpstreamDist"));

    Ok(())
}

#[test]
fn command_calc_malformed_rows_are_skipped() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let clean = dir.path().join("clean.csv");
    let dirty = dir.path().join("dirty.csv");

    for (input, output) in [
        ("tests/calc/integration_sites.csv", &clean),
        ("tests/calc/integration_sites_malformed.csv", &dirty),
    ] {
        let mut cmd = Command::cargo_bin("enzdist")?;
        cmd.arg("calc-distances")
            .arg("--enzyme-file")
            .arg("tests/calc/enzyme_sites.csv")
            .arg("--integration-file")
            .arg(input)
            .arg("--output")
            .arg(output)
            .assert()
            .success();
    }

    // interleaved malformed rows change nothing
    assert_eq!(
        std::fs::read_to_string(&clean)?,
        std::fs::read_to_string(&dirty)?
    );

    let mut cmd = Command::cargo_bin("enzdist")?;
    cmd.arg("calc-distances")
        .arg("--enzyme-file")
        .arg("tests/calc/enzyme_sites.csv")
        .arg("--integration-file")
        .arg("tests/calc/integration_sites_malformed.csv")
        .arg("--output")
        .arg(dir.path().join("again.csv"))
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping malformed integration row"));

    Ok(())
}

#[test]
fn command_calc_empty_writes_nothing() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("distances.csv");

    let mut cmd = cargo_bin_cmd!("enzdist");
    cmd.arg("calc-distances")
        .arg("--enzyme-file")
        .arg("tests/calc/enzyme_sites.csv")
        .arg("--integration-file")
        .arg("tests/calc/integration_sites_empty.csv")
        .arg("--output")
        .arg(&output);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("No distance results to write"));

    assert!(!output.exists());

    Ok(())
}

#[test]
fn command_calc_bad_position_is_fatal() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let enzyme_file = dir.path().join("enzymes.csv");
    std::fs::write(&enzyme_file, "EcoRI,chr1,12x4\n")?;

    let mut cmd = cargo_bin_cmd!("enzdist");
    cmd.arg("calc-distances")
        .arg("--enzyme-file")
        .arg(&enzyme_file)
        .arg("--integration-file")
        .arg("tests/calc/integration_sites.csv")
        .arg("--output")
        .arg(dir.path().join("out.csv"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid position '12x4'"));

    Ok(())
}

#[test]
fn command_calc_missing_file_is_fatal() -> anyhow::Result<()> {
    let mut cmd = cargo_bin_cmd!("enzdist");
    cmd.arg("calc-distances")
        .arg("--enzyme-file")
        .arg("tests/calc/no_such_file.csv")
        .arg("--integration-file")
        .arg("tests/calc/integration_sites.csv")
        .arg("--output")
        .arg("stdout");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("could not open"));

    Ok(())
}
