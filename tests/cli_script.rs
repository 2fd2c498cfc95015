use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn script_command(home: &std::path::Path, file: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("expense_core_cli").unwrap();
    cmd.env("EXPENSE_CORE_HOME", home)
        .env("EXPENSE_CORE_FILE", file)
        .env("EXPENSE_CORE_CLI_SCRIPT", "1");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = tempdir().unwrap();
    let file = home.path().join("expenses.csv");
    let input = "add 12.50 Food 2025-03-01 lunch\n\
                 add 3 Transport 2025-03-02\n\
                 list\n\
                 summary\n\
                 exit\n";

    script_command(home.path(), &file)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Expense added"))
        .stdout(contains("12.50"))
        .stdout(contains("Transport"))
        .stdout(contains("Total"));

    let csv = std::fs::read_to_string(&file).unwrap();
    assert!(csv.starts_with("amount,category,date,note"));
    assert!(csv.contains("lunch"));
}

#[test]
fn script_mode_edits_and_removes_by_listed_row() {
    let home = tempdir().unwrap();
    let file = home.path().join("expenses.csv");
    let input = "add 10 Food 2025-03-01 a\n\
                 add 20 Food 2025-03-02 b\n\
                 list\n\
                 edit 1 11 Other 2025-03-04 edited\n\
                 remove 2\n\
                 list\n\
                 exit\n";

    script_command(home.path(), &file)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Expense updated"))
        .stdout(contains("Removed 20.00 Food on 2025-03-02"));

    let csv = std::fs::read_to_string(&file).unwrap();
    assert!(csv.contains("edited"));
    assert!(!csv.contains(",b"));
}

#[test]
fn export_writes_the_filtered_view_not_the_backing_file() {
    let home = tempdir().unwrap();
    let file = home.path().join("expenses.csv");
    let export = home.path().join("filtered.csv");
    let input = format!(
        "add 10 Food 2025-03-01 keep\n\
         add 20 Transport 2025-03-02 drop\n\
         list Food\n\
         export {}\n\
         exit\n",
        export.display()
    );

    script_command(home.path(), &file)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Exported 1 expenses"));

    let exported = std::fs::read_to_string(&export).unwrap();
    assert!(exported.starts_with("amount,category,date,note"));
    assert!(exported.contains("keep"));
    assert!(!exported.contains("drop"));

    let backing = std::fs::read_to_string(&file).unwrap();
    assert!(backing.contains("drop"));
}

#[test]
fn unknown_commands_suggest_the_closest_match() {
    let home = tempdir().unwrap();
    let file = home.path().join("expenses.csv");

    script_command(home.path(), &file)
        .write_stdin("lsit\nexit\n")
        .assert()
        .success()
        .stdout(contains("Did you mean `list`?"));
}
