//! Integration tests writing complete module trees and reading them back
//! through their conf manifests.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use sword_formats::conf::{ConfRecord, ModuleKind, parse_conf};
use sword_formats::reference::Reference;
use sword_formats::versification::Versification;
use sword_formats::zld::{ZldReader, ZldWriter};
use sword_formats::ztext::{BlockGranularity, Testament, ZTextReader, ZTextWriter};
use sword_formats::{ModuleReader, ModuleWriter, OpenOptions};

fn template(name: &str, versification: &str) -> ConfRecord {
    let mut conf = ConfRecord::new(name);
    conf.set("Description", format!("{name} test module"));
    conf.set("Lang", "la");
    conf.set("Versification", versification);
    conf
}

#[test]
fn vulgate_module_uses_latin_psalm_numbering() {
    let root = tempfile::tempdir().expect("tempdir");
    let mut writer = ZTextWriter::new(Versification::new("Vulg")).with_granularity(BlockGranularity::Book);
    writer
        .write_entry("Ps.118.176", "erravi sicut ovis quae periit")
        .expect("write");
    writer.write_entry("Tob.1.1", "Tobias ex tribu et civitate Nepthalim").expect("write");
    writer.write_entry("Matt.1.1", "liber generationis Iesu Christi").expect("write");
    let written = writer.finalize(root.path(), &template("Vulgata", "Vulg")).expect("finalize");

    let conf = parse_conf(&written.conf_path).expect("conf");
    assert_eq!(conf.module_kind(), ModuleKind::Bible);
    assert_eq!(conf.block_type, "BOOK");
    assert!(conf.is_compressed());

    let reader = ZTextReader::open(&conf, conf.resolve_data_path(root.path()), 4).expect("open");
    assert_eq!(reader.versification().name(), "Vulg");
    assert_eq!(
        reader.verse_text(&Reference::parse("Ps.118.176").expect("parse")).unwrap(),
        "erravi sicut ovis quae periit"
    );
    assert_eq!(
        reader.verse_text(&Reference::parse("Tobit 1:1").expect("parse")).unwrap(),
        "Tobias ex tribu et civitate Nepthalim"
    );
    assert!(reader.has_testament(Testament::New));
}

#[test]
fn kjv_module_rejects_vulgate_only_books() {
    let root = tempfile::tempdir().expect("tempdir");
    let mut writer = ZTextWriter::new(Versification::new("KJV"));
    assert!(writer.write_entry("Tob.1.1", "text").is_err());
    writer.write_entry("Gen.1.1", "In the beginning").expect("write");
    let written = writer.finalize(root.path(), &template("Kjv", "KJV")).expect("finalize");
    assert!(!written.data_path.join("nt.bzv").exists());
    assert!(written.data_path.join("ot.bzv").exists());
}

#[test]
fn concurrent_readers_share_one_module() {
    let root = tempfile::tempdir().expect("tempdir");
    let v11n = Versification::new("KJV");
    let mut writer = ZTextWriter::new(v11n).with_granularity(BlockGranularity::Chapter);
    for reference in v11n.references(false).filter(|r| r.book == "Gen" && r.chapter <= 5) {
        writer
            .put_verse(&reference, format!("{} {}:{}", reference.book, reference.chapter, reference.verse))
            .expect("put");
    }
    let written = writer.finalize(root.path(), &template("Threads", "KJV")).expect("finalize");
    let conf = parse_conf(&written.conf_path).expect("conf");
    let reader = Arc::new(
        <ZTextReader as ModuleReader>::open(&conf, &written.data_path, &OpenOptions::default().with_cache_capacity(2))
            .expect("open"),
    );

    let handles: Vec<_> = (1..=5u16)
        .map(|chapter| {
            let reader = Arc::clone(&reader);
            thread::spawn(move || {
                for verse in 1..=10u16 {
                    let text = reader.verse_text(&Reference::new("Gen", chapter, verse)).expect("read");
                    assert_eq!(text, format!("Gen {chapter}:{verse}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("reader thread");
    }
}

#[test]
fn dictionary_index_is_sorted_on_disk() {
    let root = tempfile::tempdir().expect("tempdir");
    let mut writer = ZldWriter::with_block_size(64);
    for (key, text) in [("LOVE", "agape"), ("FAITH", "pistis"), ("HOPE", "elpis"), ("GRACE", "charis")] {
        writer.put(key, text.repeat(10)).expect("put");
    }
    let written = writer.finalize(root.path(), &template("Words", "")).expect("finalize");

    let keys: Vec<_> = writer.entries().iter().map(|e| e.key.clone()).collect();
    assert_eq!(keys, vec!["FAITH", "GRACE", "HOPE", "LOVE"]);

    let conf = parse_conf(&written.conf_path).expect("conf");
    let reader = ZldReader::open(&conf, conf.resolve_data_path(root.path())).expect("open");
    assert_eq!(reader.keys().collect::<Vec<_>>(), keys);
    assert_eq!(reader.get("HOPE").unwrap(), Some("elpis".repeat(10)));
    assert_eq!(reader.prefix_search_ignore_case("gr"), vec!["GRACE"]);
}

#[test]
fn conf_round_trips_through_manifest() {
    let root = tempfile::tempdir().expect("tempdir");
    let mut template = template("Annotated", "KJV");
    template.set("GlobalOptionFilter", "OSISStrongs");
    template.set("GlobalOptionFilter", "OSISFootnotes");
    template.set("About", "Line one");

    let mut writer = ZTextWriter::new(Versification::new("KJV"));
    writer.write_entry("Gen.1.1", "text").expect("write");
    let written = writer.finalize(root.path(), &template).expect("finalize");

    let parsed = parse_conf(&written.conf_path).expect("conf");
    assert_eq!(parsed, written.conf);
    assert_eq!(parsed.global_option_filters, vec!["OSISStrongs", "OSISFootnotes"]);
}
