//! End-to-end CLI tests.
//!
//! Each test runs the `minic` binary in its own temporary working
//! directory, so the default `target.txt` output never collides between
//! tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn minic() -> Command {
    Command::cargo_bin("minic").expect("binary builds")
}

/// Writes a source file into `dir` and returns its path.
fn write_source(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("prog.c");
    fs::write(&path, content).expect("write test source");
    path
}

fn read_target(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("target.txt")).expect("target.txt written")
}

#[test]
fn test_missing_source_argument() {
    minic()
        .assert()
        .failure()
        .code(1)
        .stdout("Error: Missing source file name\n");
}

#[test]
fn test_unreadable_source_file() {
    let dir = TempDir::new().unwrap();
    minic()
        .current_dir(dir.path())
        .arg("no_such_file.c")
        .assert()
        .failure()
        .code(1)
        .stdout("Error: Cannot open source file\n");
}

#[test]
fn test_single_declaration() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int x;");

    minic()
        .current_dir(dir.path())
        .arg(source)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("<KEY, int>")
                .and(predicate::str::contains("<ID, x>"))
                .and(predicate::str::contains("<DEL, ;>")),
        );

    assert_eq!(read_target(&dir), "SUB $sp, $sp, 4\n");
}

#[test]
fn test_constant_assignment() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int x; x = 3;");

    minic().current_dir(dir.path()).arg(source).assert().success();

    assert_eq!(
        read_target(&dir),
        "SUB $sp, $sp, 4\n\
         LI $t0, 3\n\
         SW $t0, 0($sp)\n"
    );
}

#[test]
fn test_arithmetic_precedence() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int a; int b; int c; a = b + c * 2;");

    minic().current_dir(dir.path()).arg(source).assert().success();

    let target = read_target(&dir);
    let mul = target.find("MUL $t2, $t0, $t1").expect("term lowered");
    let add = target.find("ADD $t2, $t0, $t1").expect("sum lowered");
    assert!(mul < add, "the term must be computed before the sum");
}

#[test]
fn test_if_else() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int x; if (x < 10) x = 1; else x = 2;");

    minic().current_dir(dir.path()).arg(source).assert().success();

    assert_eq!(
        read_target(&dir),
        "SUB $sp, $sp, 4\n\
         LW $t0, 0($sp)\n\
         LI $t1, 10\n\
         BLT $t0, $t1, 3\n\
         J 5\n\
         LI $t0, 1\n\
         SW $t0, 0($sp)\n\
         J 6\n\
         LI $t0, 2\n\
         SW $t0, 0($sp)\n"
    );
}

#[test]
fn test_while_loop() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int i; while (i < 10) i = i + 1;");

    minic().current_dir(dir.path()).arg(source).assert().success();

    assert_eq!(
        read_target(&dir),
        "SUB $sp, $sp, 4\n\
         LW $t0, 0($sp)\n\
         LI $t1, 10\n\
         BLT $t0, $t1, 3\n\
         J 6\n\
         LW $t0, 0($sp)\n\
         LI $t1, 1\n\
         ADD $t2, $t0, $t1\n\
         LW $t0, 4($sp)\n\
         SW $t0, 0($sp)\n\
         J 1\n"
    );
}

#[test]
fn test_return_with_expression() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int x; return (x);");

    minic().current_dir(dir.path()).arg(source).assert().success();

    assert_eq!(
        read_target(&dir),
        "SUB $sp, $sp, 4\n\
         LW $v0, 0($sp)\n\
         JR $ra\n"
    );
}

#[test]
fn test_output_flag_redirects_target() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int x; x = 3;");
    let output_path = dir.path().join("listing.s");

    minic()
        .current_dir(dir.path())
        .arg(source)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let listing = fs::read_to_string(&output_path).expect("listing written at -o path");
    assert_eq!(
        listing,
        "SUB $sp, $sp, 4\n\
         LI $t0, 3\n\
         SW $t0, 0($sp)\n"
    );
    assert!(!dir.path().join("target.txt").exists());
}

#[test]
fn test_dangling_output_flag() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int x;");

    minic()
        .current_dir(dir.path())
        .arg(source)
        .arg("-o")
        .assert()
        .failure()
        .code(1)
        .stdout("Error: Invalid arguments: -o requires a target path\n");
}

#[test]
fn test_token_echo_order() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int x; x = 1;");

    minic()
        .current_dir(dir.path())
        .arg(source)
        .assert()
        .success()
        .stdout(
            "<KEY, int>\n\
             <ID, x>\n\
             <DEL, ;>\n\
             <ID, x>\n\
             <OP, =>\n\
             <NUM, 1>\n\
             <DEL, ;>\n",
        );
}

#[test]
fn test_undeclared_identifier() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "x = 1;");

    minic()
        .current_dir(dir.path())
        .arg(source)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::ends_with("Error: Undeclared identifier\n"));
}

#[test]
fn test_duplicate_declaration() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int x; int x;");

    minic()
        .current_dir(dir.path())
        .arg(source)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::ends_with("Error: Duplicate declaration\n"));
}

#[test]
fn test_divide_by_zero() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int x; x = 1/0;");

    minic()
        .current_dir(dir.path())
        .arg(source)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::ends_with("Error: Divide by zero\n"));
}

#[test]
fn test_invalid_character_echoes_err_token() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int x; @");

    minic()
        .current_dir(dir.path())
        .arg(source)
        .assert()
        .failure()
        .code(1)
        .stdout(
            predicate::str::contains("<ERR, @>")
                .and(predicate::str::ends_with("Error: Invalid character\n")),
        );
}

#[test]
fn test_missing_semicolon() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int x; x = 1");

    minic()
        .current_dir(dir.path())
        .arg(source)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::ends_with("Error: Missing ;\n"));
}

#[test]
fn test_failed_compile_writes_no_target() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "int x; int x;");

    minic().current_dir(dir.path()).arg(source).assert().failure();

    assert!(!dir.path().join("target.txt").exists());
}
