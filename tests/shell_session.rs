//! End-to-end command sessions through the shell

use heapsim::{HeapError, Placement, Shell, SimConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn session(config: &SimConfig, script: &str) -> Vec<String> {
    let mut shell = Shell::new(config).unwrap().with_prompt(None);
    let mut out = Vec::new();
    shell.run(script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_first_fit_session() {
    let script = "\
malloc 10
malloc 1
malloc 3
malloc 1
malloc 10
free 1
free 16
malloc 3
quit
";
    let lines = session(&SimConfig::default(), script);
    assert_eq!(lines, vec!["1", "13", "16", "21", "24", "1"]);
}

#[test]
fn test_best_fit_session() {
    let script = "\
malloc 10
malloc 1
malloc 3
malloc 1
malloc 10
malloc 90
free 1
free 16
malloc 3
";
    let config = SimConfig::default().with_strategy(Placement::BestFit);
    let lines = session(&config, script);
    assert_eq!(lines.last().unwrap(), "16");
}

#[test]
fn test_blocklist_output() {
    let lines = session(&SimConfig::default(), "malloc 4\nmalloc 4\nfree 1\nblocklist\n");

    assert_eq!(lines[..2], ["1", "7"]);
    let mut list = lines[2..].to_vec();
    assert_eq!(list[0], "113-13-free");
    list.sort();
    assert_eq!(list, vec!["113-13-free", "4-1-free", "4-7-allocated"]);
}

#[test]
fn test_blocklist_json() {
    let lines = session(&SimConfig::default(), "malloc 20\nblocklist json\n");
    let parsed: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();

    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["payload_size"], 103);
    assert_eq!(entries[0]["allocated"], false);
    assert_eq!(entries[1]["payload_offset"], 1);
}

#[test]
fn test_stats_and_check() {
    let lines = session(
        &SimConfig::default(),
        "malloc 10\nstats json\ncheck\nwritemem 0 x\ncheck\n",
    );

    let stats: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(stats["allocated_bytes"], 10);
    assert_eq!(stats["free_blocks"], 1);
    assert_eq!(lines[2], "ok");
    assert!(lines[3].starts_with("error: Heap corrupted at offset 0"));
}

#[test]
fn test_printmem_shows_tags() {
    let lines = session(&SimConfig::default(), "malloc 2\nprintmem 0 5\nprintmem 126 1\n");
    assert_eq!(lines[1], "9-0-0-9-246");
    assert_eq!(lines[2], "246");
}

#[test]
fn test_errors_are_reported_and_session_continues() {
    let lines = session(
        &SimConfig::default(),
        "malloc\nmalloc 126\nmalloc 200\nfree 0\nprintmem 120 10\nfrobnicate\nmalloc 1\n",
    );

    assert_eq!(lines.len(), 7);
    assert!(lines[0].contains("Malformed command"));
    assert!(lines[1].contains("Out of memory"));
    assert!(lines[2].contains("Encoding overflow"));
    assert!(lines[3].contains("Invalid address"));
    assert!(lines[4].contains("Invalid address"));
    assert!(lines[5].contains("unknown command 'frobnicate'"));
    assert_eq!(lines[6], "1");
}

#[test]
fn test_malloc_over_undersized_tag_reports_corruption() {
    let lines = session(
        &SimConfig::default(),
        "writemem 0 \u{2}\nprintmem 0 4\nmalloc 0\nprintmem 0 4\n",
    );

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "2-0-0-0");
    assert!(lines[1].starts_with("error: Heap corrupted at offset 0"));
    assert_eq!(lines[2], lines[0]);
}

#[test]
fn test_end_of_input_ends_session() {
    let lines = session(&SimConfig::default(), "malloc 1\n\n   \nmalloc 1");
    assert_eq!(lines, vec!["1", "4"]);
}

#[test]
fn test_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "strategy = \"best-fit\"\narena_size = 32\nprompt = \"$ \"").unwrap();

    let config = SimConfig::from_file(file.path()).unwrap();
    assert_eq!(config.strategy, Placement::BestFit);

    let mut shell = Shell::new(&config).unwrap();
    let mut out = Vec::new();
    shell.run("malloc 40\nquit\n".as_bytes(), &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.starts_with("$ error: Out of memory"));
    assert_eq!(shell.arena().len(), 32);
}

#[test]
fn test_missing_config_file() {
    let result = SimConfig::from_file("/nonexistent/heapsim.toml");
    assert!(matches!(result, Err(HeapError::Io(_))));
}
