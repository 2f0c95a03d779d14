//! End-to-end tests against the public API: decode/encode behaviour and a
//! content tree edited and checked through the document and check modules.

use hugo_matter::check::{self, CheckOutcome};
use hugo_matter::config::{self, ToolConfig};
use hugo_matter::document::{self, ContentFile};
use hugo_matter::value::front_matter_from_json;
use hugo_matter::{ArrayItem, FrontMatter, Value, decode, encode};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn mapping(entries: Vec<(&str, Value)>) -> FrontMatter {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[test]
fn decode_never_fails_on_garbage() {
    let inputs = [
        "",
        "\n\n\n",
        "====",
        "= = =",
        "[[[[",
        "\"\"\"",
        "key = [\"unterminated",
        "\u{0}\u{1} = \u{2}",
        "ключ = значение",
    ];
    for input in inputs {
        let _ = decode(input);
    }
}

#[test]
fn decode_ignores_lines_without_pairs() {
    assert!(decode("hello\nworld\n# x = 1\n   \n").is_empty());
}

#[test]
fn decode_documented_examples() {
    assert_eq!(
        decode("a = 1\nb = 2\na = 3"),
        mapping(vec![("a", Value::Number(3.0)), ("b", Value::Number(2.0))])
    );
    assert_eq!(
        decode("y = [ \"a\", \"b\" , \"c\"]"),
        mapping(vec![(
            "y",
            Value::Array(vec!["a".into(), "b".into(), "c".into()])
        )])
    );
    assert_eq!(
        decode("# comment\n\nk = \"v\""),
        mapping(vec![("k", Value::String("v".into()))])
    );
}

#[test]
fn encode_documented_examples() {
    assert_eq!(encode(&mapping(vec![("a", Value::Null)])), "");
    assert_eq!(
        encode(&mapping(vec![(
            "items",
            Value::Array(vec!["x".into(), "y".into()])
        )])),
        "items = [\"x\", \"y\"]"
    );
}

#[test]
fn json_object_round_trips_through_front_matter() {
    let json = json!({
        "title": "Night Walk",
        "weight": 10,
        "ratio": 0.75,
        "draft": false,
        "tags": ["film", "city"],
        "series": [1, 2]
    });
    let fm = front_matter_from_json(json.clone()).unwrap();
    let back = decode(&encode(&fm));
    assert_eq!(back, fm);
    assert_eq!(serde_json::to_value(&back).unwrap(), json);
}

#[test]
fn embedded_quotes_do_not_round_trip() {
    let fm = mapping(vec![("quote", Value::from("she said \"go\""))]);
    let back = decode(&encode(&fm));
    assert_eq!(
        back.get("quote"),
        Some(&Value::String("she said \\\"go\\\"".into()))
    );
}

#[test]
fn set_value_and_check_tree() {
    let tmp = TempDir::new().unwrap();
    let posts = tmp.path().join("posts");
    fs::create_dir_all(&posts).unwrap();
    let post = posts.join("walk.md");
    fs::write(&post, "+++\ntitle = \"Walk\"\n+++\nBody text\n").unwrap();
    fs::write(posts.join("bad.md"), "+++\ntitle\n+++\n").unwrap();

    let cfg = config::load_config(tmp.path()).unwrap();

    let tags = hugo_matter::codec::infer_value("[\"a\", 2]");
    document::set_value(&post, "tags", tags, &cfg).unwrap();

    let text = fs::read_to_string(&post).unwrap();
    assert_eq!(
        text,
        "+++\ntitle = \"Walk\"\ntags = [\"a\", 2]\n+++\nBody text\n"
    );
    let reread = ContentFile::parse(&text, "+++");
    assert_eq!(
        reread.front_matter.get("tags"),
        Some(&Value::Array(vec![ArrayItem::from("a"), ArrayItem::from(2.0)]))
    );

    let report = check::check(tmp.path(), &cfg).unwrap();
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.failures().count(), 1);
    let walk = report.files.iter().find(|f| f.path == post).unwrap();
    assert_eq!(walk.outcome, CheckOutcome::Valid { keys: 2 });
}

#[test]
fn config_file_switches_delimiter() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(config::CONFIG_FILE_NAME),
        "[document]\ndelimiter = \"---\"\n",
    )
    .unwrap();
    let cfg: ToolConfig = config::load_config(tmp.path()).unwrap();

    let post = tmp.path().join("post.md");
    fs::write(&post, "---\nweight = 3\n---\n").unwrap();
    let file = document::read_content_file(&post, &cfg).unwrap();
    assert_eq!(file.front_matter.get("weight"), Some(&Value::Number(3.0)));
}
