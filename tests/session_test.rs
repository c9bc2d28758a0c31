use std::fs;
use vshell::storage::HostStore;
use vshell::{EntryKind, Environment, Interpreter, Namespace};

fn host_shell(dir: &std::path::Path) -> Interpreter {
    let env = Environment::with_store(
        Namespace::seeded().unwrap(),
        "Marlon_Dominguez",
        Box::new(HostStore::new(dir)),
    );
    Interpreter::with_builtins(env)
}

fn exec(sh: &mut Interpreter, line: &str) -> String {
    let mut out = Vec::new();
    sh.execute_line(line, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_navigation_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = host_shell(dir.path());

    assert_eq!(exec(&mut sh, "pwd"), "Home\n");
    exec(&mut sh, "cd folder");
    exec(&mut sh, "cd Misc");
    assert_eq!(exec(&mut sh, "pwd"), "Home/folder/Misc\n");
    assert_eq!(exec(&mut sh, "ls"), "No elements present in directory.\n");

    exec(&mut sh, "cd.");
    exec(&mut sh, "cd.");
    assert_eq!(exec(&mut sh, "pwd"), "Home\n");
    assert_eq!(
        exec(&mut sh, "cd."),
        "cd.: already at the root directory\n"
    );
    assert_eq!(exec(&mut sh, "whoami"), "Marlon_Dominguez\n");
}

#[test]
fn test_build_move_and_remove_tree() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = host_shell(dir.path());

    exec(&mut sh, "mkdir projects");
    exec(&mut sh, "cd projects");
    exec(&mut sh, "mkdir rust");
    exec(&mut sh, "touch notes.txt");
    exec(&mut sh, "mv notes.txt rust");
    assert_eq!(exec(&mut sh, "ls"), "rust\n");
    exec(&mut sh, "cd rust");
    assert_eq!(exec(&mut sh, "ls"), "notes.txt\n");
    exec(&mut sh, "cd.");
    exec(&mut sh, "cd.");

    let before = sh.env().namespace.len();
    assert_eq!(exec(&mut sh, "rmdir projects"), "");
    assert_eq!(sh.env().namespace.len(), before - 3);
    assert!(sh.env().namespace.check_invariants().is_ok());
    assert_eq!(
        exec(&mut sh, "cd projects"),
        "cd: Directory does not exist: projects\n"
    );
}

#[test]
fn test_mv_with_create_flag() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = host_shell(dir.path());

    assert_eq!(exec(&mut sh, "mv -p Random.java src"), "");

    let ns = &sh.env().namespace;
    let src = ns.lookup(ns.root(), "src").unwrap();
    assert_eq!(ns[src].kind(), EntryKind::Directory);
    assert_eq!(ns.ls(src), vec!["Random.java"]);
    assert!(ns.check_invariants().is_ok());
}

#[test]
fn test_cp_duplicates_host_content() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("dummy_data_1.txt"), "hello").unwrap();
    let mut sh = host_shell(dir.path());

    assert_eq!(exec(&mut sh, "cp dummy_data_1.txt b.txt"), "");

    assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "hello");
    assert_eq!(
        fs::read_to_string(dir.path().join("dummy_data_1.txt")).unwrap(),
        "hello"
    );
    let ns = &sh.env().namespace;
    let copy = ns.lookup(ns.root(), "b.txt").unwrap();
    assert_eq!(ns[copy].kind(), EntryKind::File);
    assert_eq!(ns[copy].size(), 5);
}

#[test]
fn test_cp_without_host_file_leaves_no_entry() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = host_shell(dir.path());

    let out = exec(&mut sh, "cp dummy_data_2.txt b.txt");

    assert!(out.starts_with("cp: cannot copy dummy_data_2.txt to b.txt"));
    let ns = &sh.env().namespace;
    assert_eq!(ns.lookup(ns.root(), "b.txt"), None);
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn test_unknown_verb_then_continue() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = host_shell(dir.path());

    assert_eq!(exec(&mut sh, "dir"), "Unknown command: dir\n");
    assert_eq!(exec(&mut sh, "pwd"), "Home\n");
}
