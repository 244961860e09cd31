//! Integration tests for loading and saving `RESOLV.SRV`.

use std::fs;

use adde_core::resolv::{DESCRIPTOR_KEY, parse_lines};
use adde_core::{ResolvEntry, ResolvStore, distinct_groups};
use tempfile::tempdir;

#[test]
fn comment_blank_and_records_scenario() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("RESOLV.SRV");
    fs::write(
        &path,
        "# comment\n\nGROUP1 entry-a\nGROUP2 entry-b\nGROUP1 entry-c\n",
    )
    .unwrap();

    let entries = ResolvStore::new(&path).load().unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(distinct_groups(&entries), vec!["GROUP1", "GROUP2"]);
    let lines: Vec<_> = entries.iter().filter_map(ResolvEntry::to_line).collect();
    assert_eq!(lines, vec!["GROUP1 entry-a", "GROUP2 entry-b", "GROUP1 entry-c"]);
}

#[test]
fn save_then_load_round_trips() {
    let temp = tempdir().unwrap();
    let store = ResolvStore::new(temp.path().join("adde").join("data").join("RESOLV.SRV"));

    let mut entries = parse_lines(
        "N1=RT,N2=GOES,TYPE=IMAGE,K=AREA,R1=1,R2=99,C=East, full disk,\n\
         LOCAL sounding\n\
         N1=POINT,N2=SFC,TYPE=POINT,\n",
    );
    let mut edited = ResolvEntry::empty();
    edited.set_group("NEW");
    edited.set_field(DESCRIPTOR_KEY, "GRID").unwrap();
    edited.set_field("TYPE", "GRID").unwrap();
    entries.push(edited);
    entries.push(ResolvEntry::empty());

    assert_eq!(store.save(&entries).unwrap(), 4);
    let reloaded = store.load().unwrap();

    let expected: Vec<ResolvEntry> = entries
        .into_iter()
        .filter(|e| e.to_line().is_some())
        .collect();
    assert_eq!(reloaded, expected);
    assert_eq!(reloaded[3].to_line().as_deref(), Some("N1=NEW,N2=GRID,TYPE=GRID,"));
}

#[test]
fn save_preserves_memory_order_not_sorted() {
    let temp = tempdir().unwrap();
    let store = ResolvStore::new(temp.path().join("RESOLV.SRV"));
    let entries = parse_lines("Z last\nA first\nM middle\n");

    store.save(&entries).unwrap();

    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "Z last\nA first\nM middle\n"
    );
}

#[test]
fn untouched_lines_survive_verbatim() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("RESOLV.SRV");
    let original = "N1=A,N2=B,C=spaces  kept ,\n";
    fs::write(&path, format!("# keep me out\n{original}")).unwrap();
    let store = ResolvStore::new(&path);

    let entries = store.load().unwrap();
    store.save(&entries).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}
