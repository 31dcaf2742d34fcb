//! End-to-end generation over module files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use declc::dialect::{MssqlDialect, PostgresDialect, Profile};
use declc::emit::write_schema;
use declc::graph::load_graph;

fn write_module(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(format!("{name}.json"));
    fs::write(&path, json).unwrap();
    path
}

fn person_module() -> &'static str {
    r#"{
        "name": "app.model",
        "imports": ["app.shared"],
        "decls": [
            {
                "name": "Person",
                "kind": "struct",
                "fields": [
                    { "name": "id",
                      "type": { "kind": "ref",
                                "name": { "module": "common.db", "name": "DbKey" },
                                "params": [ { "kind": "ref",
                                              "name": { "module": "app.model", "name": "Person" } } ] } },
                    { "name": "email",
                      "type": { "kind": "ref",
                                "name": { "module": "app.shared", "name": "Email" } } },
                    { "name": "nickname",
                      "type": { "kind": "ref",
                                "name": { "module": "sys.types", "name": "Maybe" },
                                "params": [ { "kind": "primitive", "primitive": "String" } ] } }
                ],
                "table": { "with_id_primary_key": true }
            }
        ]
    }"#
}

fn shared_module() -> &'static str {
    r#"{
        "name": "app.shared",
        "decls": [
            { "name": "Email", "kind": "type_alias",
              "underlying": { "kind": "primitive", "primitive": "String" } }
        ]
    }"#
}

fn generate(files: &[PathBuf], search_dirs: &[PathBuf], dialect: Profile) -> String {
    let (graph, requested) = load_graph(files, search_dirs).unwrap();
    let mut out = Vec::new();
    write_schema(&mut out, &graph, &requested, &dialect).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn generates_person_schema_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let main = write_module(dir.path(), "app.model", person_module());
    write_module(dir.path(), "app.shared", shared_module());

    let sql = generate(
        &[main],
        &[dir.path().to_path_buf()],
        Profile::from(PostgresDialect),
    );

    let expected = "\
-- Generated schema for modules:
--   app.model

create table person(
  id text not null,     -- DbKey<Person>
  email text not null,  -- Email
  nickname text,        -- Maybe<String>
  primary key(id)
);

alter table person add constraint person_id_fk foreign key (id) references person(id);

";
    assert_eq!(sql, expected);
}

#[test]
fn alias_from_imported_module_is_transparent() {
    // email's declared type is app.shared.Email; the emitted column type is
    // the dialect mapping of the alias's underlying primitive.
    let dir = tempfile::tempdir().unwrap();
    let main = write_module(dir.path(), "app.model", person_module());
    write_module(dir.path(), "app.shared", shared_module());

    let sql = generate(
        &[main],
        &[dir.path().to_path_buf()],
        Profile::from(PostgresDialect),
    );
    assert!(sql.contains("email text not null,"));
    // The imported module itself contributes no tables and no header entry.
    assert!(!sql.contains("app.shared"));
}

#[test]
fn mssql_dialect_changes_column_spellings() {
    let dir = tempfile::tempdir().unwrap();
    let main = write_module(dir.path(), "app.model", person_module());
    write_module(dir.path(), "app.shared", shared_module());

    let sql = generate(
        &[main],
        &[dir.path().to_path_buf()],
        Profile::from(MssqlDialect),
    );
    assert!(sql.contains("id nvarchar(64) not null,"));
    assert!(sql.contains("email nvarchar(max) not null,"));
}

#[test]
fn written_file_is_byte_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let main = write_module(dir.path(), "app.model", person_module());
    write_module(dir.path(), "app.shared", shared_module());
    let search = vec![dir.path().to_path_buf()];

    let first = generate(std::slice::from_ref(&main), &search, Profile::from(PostgresDialect));
    let second = generate(std::slice::from_ref(&main), &search, Profile::from(PostgresDialect));
    assert_eq!(first, second);

    let out_path = dir.path().join("schema.sql");
    fs::write(&out_path, first.as_bytes()).unwrap();
    assert_eq!(fs::read_to_string(&out_path).unwrap(), second);
}
