#[cfg(test)]
mod integration {
    use crate::{
        config::Config,
        mcp::registry::ToolRegistry,
        security::ProjectRoot,
        server::{handle_line, serve_io, AppState},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn state(root: &std::path::Path) -> AppState {
        let cfg = Config::default();
        let root = Arc::new(ProjectRoot::new(root).unwrap());
        AppState::new(&cfg, ToolRegistry::new(root))
    }

    async fn roundtrip(state: &AppState, msg: Value) -> Value {
        let resp = handle_line(state, &msg.to_string()).await.expect("reply expected");
        serde_json::to_value(resp).unwrap()
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let tmp = tempfile::tempdir().unwrap();
        let st = state(tmp.path());
        let v = roundtrip(&st, json!({"jsonrpc":"2.0","id":1,"method":"initialize","params":{"capabilities":{}}})).await;
        assert_eq!(v["id"], 1);
        assert_eq!(v["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(v["result"]["serverInfo"]["name"], "php_api_mcp");
        assert_eq!(v["result"]["serverInfo"]["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn tools_list_has_six_tools() {
        let tmp = tempfile::tempdir().unwrap();
        let st = state(tmp.path());
        let v = roundtrip(&st, json!({"jsonrpc":"2.0","id":"two","method":"tools/list"})).await;
        let tools = v["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 6);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object() && t["description"].is_string()));
    }

    #[tokio::test]
    async fn tool_call_success_and_in_band_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let st = state(tmp.path());
        let ok = roundtrip(
            &st,
            json!({"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"write_file","arguments":{"filepath":"a.txt","content":"hi"}}}),
        )
        .await;
        assert_eq!(ok["result"]["isError"], false);
        assert!(ok["result"]["content"][0]["text"].as_str().unwrap().starts_with("Successfully wrote to "));

        let denied = roundtrip(
            &st,
            json!({"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"read_file","arguments":{"filepath":"../../etc/passwd"}}}),
        )
        .await;
        assert_eq!(denied["result"]["isError"], true);
        let text = denied["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Error: Path escapes project root"));
    }

    #[tokio::test]
    async fn unknown_tool_and_method_are_protocol_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let st = state(tmp.path());
        let v = roundtrip(&st, json!({"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"exec"}})).await;
        assert_eq!(v["error"]["code"], -32602);
        let v = roundtrip(&st, json!({"jsonrpc":"2.0","id":6,"method":"resources/list"})).await;
        assert_eq!(v["error"]["code"], -32601);
        let v = roundtrip(&st, json!({"jsonrpc":"2.0","id":7,"method":"tools/call"})).await;
        assert_eq!(v["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn parse_error_and_notifications() {
        let tmp = tempfile::tempdir().unwrap();
        let st = state(tmp.path());
        let resp = handle_line(&st, "{not json").await.unwrap();
        let v = serde_json::to_value(resp).unwrap();
        assert_eq!(v["error"]["code"], -32700);
        assert_eq!(v["id"], Value::Null);
        assert!(handle_line(&st, r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).await.is_none());
    }

    #[tokio::test]
    async fn well_formed_json_that_is_not_a_request() {
        let tmp = tempfile::tempdir().unwrap();
        let st = state(tmp.path());
        let v = roundtrip(&st, json!({"id":1,"method":"ping"})).await;
        assert_eq!(v["error"]["code"], -32600);
        assert_eq!(v["id"], 1);
        let v = roundtrip(&st, json!({"jsonrpc":"2.0","id":"abc"})).await;
        assert_eq!(v["error"]["code"], -32600);
        assert_eq!(v["id"], "abc");
        let v = roundtrip(&st, json!([1, 2])).await;
        assert_eq!(v["error"]["code"], -32600);
        assert_eq!(v["id"], Value::Null);
    }

    #[tokio::test]
    async fn explicit_null_id_gets_a_reply() {
        let tmp = tempfile::tempdir().unwrap();
        let st = state(tmp.path());
        let v = roundtrip(&st, json!({"jsonrpc":"2.0","id":null,"method":"ping"})).await;
        assert_eq!(v, json!({"jsonrpc":"2.0","id":null,"result":{}}));
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_stop_the_loop() {
        let tmp = tempfile::tempdir().unwrap();
        let st = state(tmp.path());
        let mut input = b"\xff\xfe garbage\n".to_vec();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
        input.push(b'\n');
        let mut out = Vec::new();
        serve_io(&st, input.as_slice(), &mut out).await.unwrap();
        let lines: Vec<Value> = String::from_utf8(out).unwrap().lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["error"]["code"], -32700);
        assert_eq!(lines[0]["id"], Value::Null);
        assert_eq!(lines[1], json!({"jsonrpc":"2.0","id":2,"result":{}}));
    }

    #[tokio::test]
    async fn serve_io_answers_each_request_line() {
        let tmp = tempfile::tempdir().unwrap();
        let st = state(tmp.path());
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"capabilities":{}}}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n"
        );
        let mut out = Vec::new();
        serve_io(&st, input.as_bytes(), &mut out).await.unwrap();
        let lines: Vec<Value> = String::from_utf8(out).unwrap().lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1], json!({"jsonrpc":"2.0","id":2,"result":{}}));
    }
}

#[cfg(test)]
mod unit {
    use crate::security::{resolve_under_root, ProjectRoot};
    use proptest::prelude::*;
    use std::path::{Path, PathBuf};

    fn cases() -> u32 { if cfg!(feature = "proptests") { 1024 } else { 64 } }

    fn segment() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => "[a-z]{1,6}",
            1 => Just("..".to_string()),
            1 => Just(".".to_string()),
        ]
    }

    // where a purely lexical walk lands, or None if it climbs above the root
    fn lexical_depth(segs: &[String]) -> Option<Vec<String>> {
        let mut stack = Vec::new();
        for s in segs {
            match s.as_str() {
                "." => {}
                ".." => {
                    stack.pop()?;
                }
                other => stack.push(other.to_string()),
            }
        }
        Some(stack)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(cases()))]

        #[test]
        fn resolve_matches_lexical_model(segs in prop::collection::vec(segment(), 0..8)) {
            let tmp = tempfile::tempdir().unwrap();
            let root = ProjectRoot::new(tmp.path()).unwrap();
            let input: PathBuf = segs.iter().collect();
            let got = resolve_under_root(root.path(), &input);
            match lexical_depth(&segs) {
                Some(stack) => {
                    let expected = stack.iter().fold(root.path().to_path_buf(), |p, s| p.join(s));
                    prop_assert_eq!(got.unwrap(), expected);
                }
                None => {
                    // climbing out and back in by name can still land inside
                    if let Ok(p) = got { prop_assert!(p.starts_with(root.path())); }
                }
            }
        }

        #[test]
        fn resolution_is_idempotent(segs in prop::collection::vec(segment(), 0..8)) {
            let tmp = tempfile::tempdir().unwrap();
            let root = ProjectRoot::new(tmp.path()).unwrap();
            let input: PathBuf = segs.iter().collect();
            if let Ok(first) = resolve_under_root(root.path(), &input) {
                prop_assert_eq!(resolve_under_root(root.path(), &first).unwrap(), first);
            }
        }

        #[test]
        fn relative_and_absolute_agree(segs in prop::collection::vec("[a-z]{1,6}", 1..5)) {
            let tmp = tempfile::tempdir().unwrap();
            let root = ProjectRoot::new(tmp.path()).unwrap();
            let rel: PathBuf = segs.iter().collect();
            let abs = root.path().join(&rel);
            prop_assert_eq!(
                resolve_under_root(root.path(), &rel).unwrap(),
                resolve_under_root(root.path(), &abs).unwrap()
            );
        }
    }

    #[test]
    fn escaping_traversal_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let root = ProjectRoot::new(tmp.path()).unwrap();
        assert!(resolve_under_root(root.path(), Path::new("../../etc/passwd")).is_err());
    }
}
