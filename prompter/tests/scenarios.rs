use prompter::{Check, Kind, Options, PromptError, Request, Terminal, Value};

fn terminal(input: &str) -> Terminal<&[u8], Vec<u8>> {
    Terminal::new(input.as_bytes(), Vec::new())
}

fn printed(t: &Terminal<&[u8], Vec<u8>>) -> String {
    String::from_utf8(t.output().clone()).unwrap()
}

fn bounded() -> Request {
    Request::from_json(
        r#"{
            "type": "int",
            "outputText": "> ",
            "min": 5,
            "max": 10,
            "minError": "min",
            "maxError": "max",
            "repeat": false
        }"#,
    )
    .unwrap()
}

#[test]
fn test_scenarios_bounds() {
    let mut t = terminal("7\n");
    assert_eq!(t.ask(&bounded()).unwrap(), Some(Value::Int(7)));

    let mut t = terminal("3\n");
    assert_eq!(t.ask(&bounded()).unwrap(), None);
    assert_eq!(printed(&t), "> min\n");

    let mut t = terminal("12\n");
    assert_eq!(t.ask(&bounded()).unwrap(), None);
    assert_eq!(printed(&t), "> max\n");
}

#[test]
fn test_scenarios_mult() {
    let request = Request::from_json(r#"{"type": "int", "mult": [2, 3], "repeat": false}"#).unwrap();
    assert_eq!(terminal("5\n").ask(&request).unwrap(), None);
    assert_eq!(terminal("6\n").ask(&request).unwrap(), Some(Value::Int(6)));
}

#[test]
fn test_scenarios_factor() {
    let request =
        Request::from_json(r#"{"type": "int", "factor": [12, 18], "repeat": false}"#).unwrap();
    assert_eq!(terminal("6\n").ask(&request).unwrap(), Some(Value::Int(6)));
    assert_eq!(terminal("4\n").ask(&request).unwrap(), None);
}

#[test]
fn test_scenarios_ranges() {
    let request = Request::from_json(
        r#"{"type": "int", "ranges": [[0, 5], [10, 15]], "rangesError": "out", "repeat": false}"#,
    )
    .unwrap();

    let mut t = terminal("7\n");
    assert_eq!(t.ask(&request).unwrap(), None);
    assert_eq!(printed(&t), "Enter an integer:\tout\n");

    assert_eq!(terminal("12\n").ask(&request).unwrap(), Some(Value::Int(12)));
}

#[test]
fn test_scenarios_alphabetical() {
    let request = Request::from_json(
        r#"{"type": "string", "alphabetical": true, "repeat": false}"#,
    )
    .unwrap();
    assert_eq!(
        terminal("hello world\n").ask(&request).unwrap(),
        Some(Value::Str("hello world".to_string()))
    );
    assert_eq!(terminal("hello1\n").ask(&request).unwrap(), None);
}

#[test]
fn test_scenarios_even_float() {
    let request = Request::from_json(r#"{"even": false, "errorMessage": "odd please"}"#).unwrap();
    assert_eq!(request.kind(), Kind::Float);

    let mut t = terminal("4\n2.5\n3\n");
    assert_eq!(t.ask(&request).unwrap(), Some(Value::Float(3.0)));
    assert_eq!(printed(&t).matches("odd please").count(), 2);
}

#[test]
fn test_scenarios_sentinel_wins_over_rules() {
    let request = Request::from_json(
        r#"{"type": "int", "min": 100, "exiton": ["stop", "done"], "errorMessage": "bad"}"#,
    )
    .unwrap();
    for sentinel in ["stop", "done"] {
        let input = format!("{sentinel}\n");
        let mut t = terminal(&input);
        assert_eq!(t.ask(&request).unwrap(), None);
        assert!(!printed(&t).contains("bad"));
    }
}

#[test]
fn test_scenarios_collect_until_done() {
    let request = Request::from_json(r#"{"type": "int", "exiton": "done"}"#).unwrap();
    let mut t = terminal("3\n5\ndone\n");
    assert_eq!(
        t.collect(&request).unwrap(),
        vec![Value::Int(3), Value::Int(5)]
    );
}

#[test]
fn test_scenarios_collect_budget() {
    let request = Request::from_json(r#"{"type": "int", "numInputs": 2}"#).unwrap();
    let mut t = terminal("1\n2\n3\n");
    assert_eq!(
        t.collect(&request).unwrap(),
        vec![Value::Int(1), Value::Int(2)]
    );
    let (rest, _) = t.into_parts();
    assert_eq!(rest, b"3\n");
}

#[test]
fn test_scenarios_no_repeat_single_prompt() {
    let mut t = terminal("nope\n8\n");
    assert_eq!(t.ask(&bounded()).unwrap(), None);
    assert_eq!(printed(&t).matches("> ").count(), 1);
}

#[test]
fn test_scenarios_repeat_until_valid() {
    let mut t = terminal("1\n100\nseven\n7\n");
    let options = Options::new()
        .output_text("> ")
        .min(5)
        .max(10)
        .message(Check::Type, "type")
        .message(Check::Max, "max");
    assert_eq!(t.get_int(options).unwrap(), Some(7));
    assert_eq!(printed(&t), "> > max\n> type\n> ");
}

#[test]
fn test_scenarios_file_name_must_not_exist() {
    let dir = tempfile::tempdir().unwrap();
    let taken = dir.path().join("taken.csv");
    std::fs::write(&taken, "").unwrap();
    let free = dir.path().join("free.csv");

    let input = format!("{}\n{}\n", taken.display(), free.display());
    let mut t = terminal(&input);
    let name = t
        .get_file_name(
            Options::new()
                .extension("csv")
                .exists(false)
                .message(Check::Exists, "taken"),
        )
        .unwrap();
    assert_eq!(name, Some(free.display().to_string()));
    assert!(printed(&t).contains("taken\n"));
}

#[test]
fn test_scenarios_fatal_config_errors() {
    for json in [
        r#"{"type": "int", "repeat": "yes"}"#,
        r#"{"type": "int", "numInputs": "two"}"#,
        r#"{"type": "int", "ranges": [[1]]}"#,
        r#"{"type": "filename", "mode": "q"}"#,
        r#"{"type": "string", "min": 3}"#,
    ] {
        let err: PromptError = Request::from_json(json).unwrap_err().into();
        assert!(err.is_config(), "{json} should be a config error");
    }
}
