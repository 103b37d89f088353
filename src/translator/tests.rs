use super::*;

// translate_file reads real files from disk via Arena::slurp_file, so these
// tests write their fixtures into a scratch directory rather than mocking
// the filesystem boundary.
fn write_fixture(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn scratch_dir(tag: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("basm-translator-test-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn translates_const_push_and_halt_with_entry() {
    let dir = scratch_dir("scenario1");
    let path = write_fixture(&dir, "in.bm", "%const x 40+2\npush x\nhalt:\n%entry halt\n");
    let arena = Arena::new();
    let t = translate_file(&arena, path.to_str().unwrap()).unwrap();
    assert_eq!(t.program().len(), 2);
    assert_eq!(t.program()[0].inst_type, InstType::Push);
    assert_eq!(t.program()[0].operand.as_u64(), 42);
    assert_eq!(t.program()[1].inst_type, InstType::Halt);
    assert_eq!(t.entry(), 1);
}

#[test]
fn string_const_and_len_resolve() {
    let dir = scratch_dir("scenario2");
    let path = write_fixture(&dir, "in.bm", "%const s \"hi\"\npush s\npush len(s)\n");
    let arena = Arena::new();
    let t = translate_file(&arena, path.to_str().unwrap()).unwrap();
    assert_eq!(t.memory().bytes(), b"hi");
    assert_eq!(t.program()[0].operand.as_u64(), 0);
    assert_eq!(t.program()[1].operand.as_u64(), 2);
}

#[test]
fn forward_reference_to_label_resolves() {
    let dir = scratch_dir("scenario3");
    let path = write_fixture(&dir, "in.bm", "main:\ncall foo\nfoo:\nret\n");
    let arena = Arena::new();
    let t = translate_file(&arena, path.to_str().unwrap()).unwrap();
    assert_eq!(t.program()[0].inst_type, InstType::Call);
    assert_eq!(t.program()[0].operand.as_u64(), 1);
}

#[test]
fn calling_a_const_errors_with_kind_discipline_message() {
    let dir = scratch_dir("scenario4");
    let path = write_fixture(&dir, "in.bm", "call x\n%const x 5\n");
    let arena = Arena::new();
    let err = translate_file(&arena, path.to_str().unwrap()).unwrap_err();
    assert!(err.message.contains("trying to call not a label"));
    assert!(err.message.contains("constant"));
}

#[test]
fn native_on_non_native_binding_errors() {
    let dir = scratch_dir("scenario5");
    let path = write_fixture(&dir, "in.bm", "native x\n%const x 5\n");
    let arena = Arena::new();
    let err = translate_file(&arena, path.to_str().unwrap()).unwrap_err();
    assert!(err.message.contains("trying to invoke native function"));
}

#[test]
fn entry_must_be_a_label() {
    let dir = scratch_dir("scenario6");
    let path = write_fixture(&dir, "in.bm", "%const x 5\n%entry x\n");
    let arena = Arena::new();
    let err = translate_file(&arena, path.to_str().unwrap()).unwrap_err();
    assert!(err.message.contains("Entry point has to be a label"));
}

#[test]
fn duplicate_entry_errors_with_note() {
    let dir = scratch_dir("scenario7");
    let path = write_fixture(&dir, "in.bm", "a:\nb:\n%entry a\n%entry b\n");
    let arena = Arena::new();
    let err = translate_file(&arena, path.to_str().unwrap()).unwrap_err();
    assert!(err.message.contains("already been set") || err.message.contains("already set"));
    assert!(err.note.is_some());
}

#[test]
fn cyclic_const_binding_errors() {
    let dir = scratch_dir("scenario8");
    let path = write_fixture(&dir, "in.bm", "%const a b\n%const b a\npush a\n");
    let arena = Arena::new();
    let err = translate_file(&arena, path.to_str().unwrap()).unwrap_err();
    assert!(err.message.contains("cyclic"));
}

#[test]
fn failed_assert_is_fatal() {
    let dir = scratch_dir("scenario9");
    let path = write_fixture(&dir, "in.bm", "%assert 1 > 2\n");
    let arena = Arena::new();
    let err = translate_file(&arena, path.to_str().unwrap()).unwrap_err();
    assert!(err.message.contains("assertion failed"));
}

#[test]
fn include_directive_splices_in_another_file() {
    let dir = scratch_dir("scenario10");
    write_fixture(&dir, "lib.bm", "foo:\nret\n");
    let path = write_fixture(&dir, "in.bm", &format!("%include \"{}/lib.bm\"\ncall foo\n", dir.display()));
    let arena = Arena::new();
    let t = translate_file(&arena, path.to_str().unwrap()).unwrap();
    assert_eq!(t.program()[0].inst_type, InstType::Ret);
    assert_eq!(t.program()[1].inst_type, InstType::Call);
    assert_eq!(t.program()[1].operand.as_u64(), 0);
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let dir = scratch_dir("scenario11");
    let path = write_fixture(&dir, "in.bm", "; a comment\n\n  \nhalt ; trailing comment\n");
    let arena = Arena::new();
    let t = translate_file(&arena, path.to_str().unwrap()).unwrap();
    assert_eq!(t.program().len(), 1);
    assert_eq!(t.program()[0].inst_type, InstType::Halt);
}

#[test]
fn unknown_instruction_errors() {
    let dir = scratch_dir("scenario12");
    let path = write_fixture(&dir, "in.bm", "frobnicate\n");
    let arena = Arena::new();
    let err = translate_file(&arena, path.to_str().unwrap()).unwrap_err();
    assert!(err.message.contains("unknown instruction"));
}

#[test]
fn removed_bind_directive_is_a_hard_error() {
    let dir = scratch_dir("scenario13");
    let path = write_fixture(&dir, "in.bm", "%bind x 5\n");
    let arena = Arena::new();
    let err = translate_file(&arena, path.to_str().unwrap()).unwrap_err();
    assert!(err.message.contains("%bind directive has been removed"));
}

#[test]
fn missing_top_level_input_file_is_a_raw_unlocated_error() {
    let dir = scratch_dir("scenario15");
    let missing = dir.join("does-not-exist.bm");
    let arena = Arena::new();
    let err = translate_file(&arena, missing.to_str().unwrap()).unwrap_err();
    assert!(err.message.contains("could not read file"));
    // Not a nested include, so there is no source location to report against.
    assert!(err.to_string().starts_with("ERROR: "));
}

#[test]
fn missing_included_file_is_located_at_the_include_site() {
    let dir = scratch_dir("scenario16");
    let path = write_fixture(&dir, "in.bm", "%include \"nope.bm\"\n");
    let arena = Arena::new();
    let err = translate_file(&arena, path.to_str().unwrap()).unwrap_err();
    assert!(err.message.contains("could not read file"));
    assert!(err.to_string().starts_with(&format!("{}:1: ERROR: ", path.to_str().unwrap())));
}

#[test]
fn include_chain_past_max_depth_is_a_fatal_error() {
    let dir = scratch_dir("scenario14");
    // Chain file `i` into file `i + 1` well past MAX_INCLUDE_LEVEL so the
    // check is exercised regardless of the exact off-by-one at the boundary.
    let chain_len = MAX_INCLUDE_LEVEL + 8;
    for i in 0..chain_len {
        let contents = if i + 1 < chain_len {
            format!("%include \"{}/f{}.bm\"\n", dir.display(), i + 1)
        } else {
            "ret\n".to_string()
        };
        write_fixture(&dir, &format!("f{i}.bm"), &contents);
    }
    let entry = dir.join("f0.bm");

    let arena = Arena::new();
    let err = translate_file(&arena, entry.to_str().unwrap()).unwrap_err();
    assert!(err.message.contains("exceeded maximum include level"));
}
