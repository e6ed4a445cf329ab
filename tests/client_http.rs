//! Transport-level tests for the blocking facade against a mock server.

use httpmock::{
    Method::{GET, POST},
    MockServer,
};
use hanlp_client::{CallOptions, ClientConfig, Document, HanlpClient, HanlpError, NamedEntity};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::json;

#[fixture]
fn mock_server() -> MockServer {
    MockServer::start()
}

#[fixture]
fn client(mock_server: MockServer) -> (HanlpClient, MockServer) {
    let config = ClientConfig::new().with_base_url(mock_server.base_url());
    (HanlpClient::new(config), mock_server)
}

#[fixture]
fn client_with_auth(mock_server: MockServer) -> (HanlpClient, MockServer) {
    let config = ClientConfig::new()
        .with_base_url(mock_server.base_url())
        .with_auth("secret");
    (HanlpClient::new(config), mock_server)
}

#[rstest]
fn parse_decodes_the_typed_document(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    server.mock(|when, then| {
        when.method(POST)
            .path("/parse")
            .header("accept", "application/json")
            .header("content-type", "application/json;charset=utf-8")
            .json_body(json!({ "text": "北京", "language": "zh" }));
        then.status(200)
            .json_body(json!({ "tok/fine": [["北京"]], "ner/pku": [[["北京", "ns", 0, 1]]] }));
    });
    let doc = match client.parse("北京", &CallOptions::new()) {
        Ok(doc) => doc,
        Err(e) => panic!("parse error: {e}"),
    };
    assert_eq!(doc.tok_fine, Some(vec![vec!["北京".to_owned()]]));
    assert_eq!(
        doc.ner_pku,
        Some(vec![vec![NamedEntity::new("北京", "ns", 0, 1)]])
    );
}

#[rstest]
fn auth_credential_travels_as_basic_authorization(client_with_auth: (HanlpClient, MockServer)) {
    let (client, server) = client_with_auth;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/parse")
            .header("authorization", "Basic secret");
        then.status(200).json_body(json!({}));
    });
    let doc = match client.parse("北京", &CallOptions::new()) {
        Ok(doc) => doc,
        Err(e) => panic!("parse error: {e}"),
    };
    assert!(doc.is_empty());
    mock.assert();
}

#[rstest]
fn parse_carries_tasks_and_skip_tasks(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/parse").json_body(json!({
            "text": "晓美焰来到自然语义科技公司",
            "language": "zh",
            "tasks": ["tok/coarse", "pos"],
            "skip_tasks": ["tok/fine"],
        }));
        then.status(200).json_body(json!({}));
    });
    let options = CallOptions::new()
        .with_tasks(["tok/coarse", "pos"])
        .with_skip_tasks(["tok/fine"]);
    client
        .parse("晓美焰来到自然语义科技公司", &options)
        .unwrap_or_else(|e| panic!("parse error: {e}"));
    mock.assert();
}

#[rstest]
fn rate_limited_status_surfaces_the_code(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    server.mock(|when, then| {
        when.method(POST).path("/parse");
        then.status(429).body(r#"{"code":429,"msg":"rate limited"}"#);
    });
    let Err(err) = client.parse("北京", &CallOptions::new()) else {
        panic!("expected status error")
    };
    assert_eq!(
        err,
        HanlpError::Status {
            status: 429,
            body: r#"{"code":429,"msg":"rate limited"}"#.to_owned(),
        }
    );
    assert!(err.to_string().contains("429"));
}

#[rstest]
#[case(400)]
#[case(401)]
#[case(422)]
fn client_fault_statuses_become_errors(#[case] status: u16, client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    server.mock(|when, then| {
        when.method(POST).path("/parse");
        then.status(status).body("denied");
    });
    let Err(err) = client.parse_raw("北京", &CallOptions::new()) else {
        panic!("expected status error")
    };
    assert!(matches!(err, HanlpError::Status { status: s, .. } if s == status));
}

#[rstest]
fn invalid_json_on_the_typed_path_is_a_decode_error(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    server.mock(|when, then| {
        when.method(POST).path("/parse");
        then.status(200).body("not json");
    });
    let Err(err) = client.parse("北京", &CallOptions::new()) else {
        panic!("expected decode error")
    };
    assert!(matches!(err, HanlpError::Decode(_)));
}

#[rstest]
fn raw_path_returns_the_body_verbatim(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    server.mock(|when, then| {
        when.method(POST).path("/parse");
        then.status(200).body("not json");
    });
    let body = client
        .parse_raw("北京", &CallOptions::new())
        .unwrap_or_else(|e| panic!("parse error: {e}"));
    assert_eq!(body, "not json");
    let bytes = client
        .parse_bytes("北京", &CallOptions::new())
        .unwrap_or_else(|e| panic!("parse error: {e}"));
    assert_eq!(bytes, b"not json");
}

#[rstest]
fn caller_chosen_shapes_decode_through_parse_as(client: (HanlpClient, MockServer)) {
    #[derive(Debug, Deserialize)]
    struct TokensOnly {
        #[serde(rename = "tok/fine")]
        tok_fine: Vec<Vec<String>>,
    }

    let (client, server) = client;
    server.mock(|when, then| {
        when.method(POST).path("/parse");
        then.status(200)
            .json_body(json!({ "tok/fine": [["北京", "立方庭"]] }));
    });
    let tokens: TokensOnly = client
        .parse_as("北京立方庭", &CallOptions::new())
        .unwrap_or_else(|e| panic!("parse error: {e}"));
    assert_eq!(tokens.tok_fine, vec![vec!["北京".to_owned(), "立方庭".to_owned()]]);

    // The typed document works through the same entry point.
    let doc: Document = client
        .parse_as("北京立方庭", &CallOptions::new())
        .unwrap_or_else(|e| panic!("parse error: {e}"));
    assert!(doc.tok_fine.is_some());
}

#[rstest]
fn ranked_operations_default_the_topk(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/keyphrase_extraction").json_body(json!({
            "text": "自然语言处理是一门博大精深的学科",
            "language": "zh",
            "topk": 10,
        }));
        then.status(200)
            .json_body(json!({ "自然语言处理": 0.8 }));
    });
    client
        .keyphrase_extraction("自然语言处理是一门博大精深的学科", &CallOptions::new())
        .unwrap_or_else(|e| panic!("keyphrase error: {e}"));
    mock.assert();
}

#[rstest]
fn similarity_sends_sentence_pairs(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/semantic_textual_similarity")
            .json_body(json!({
                "text": [["看图猜一电影名", "看图猜电影"]],
                "language": "zh",
                "topk": 10,
            }));
        then.status(200).json_body(json!([0.9764469]));
    });
    client
        .semantic_textual_similarity([("看图猜一电影名", "看图猜电影")], &CallOptions::new())
        .unwrap_or_else(|e| panic!("similarity error: {e}"));
    mock.assert();
}

#[rstest]
fn classification_carries_topk_and_model(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/text_classification").json_body(json!({
            "text": "世界那么大，我想去看看",
            "language": "zh",
            "topk": 3,
            "model": "news_zh",
        }));
        then.status(200).json_body(json!({ "旅游": 0.8 }));
    });
    client
        .text_classification(
            "世界那么大，我想去看看",
            &CallOptions::new().with_topk(3).with_model("news_zh"),
        )
        .unwrap_or_else(|e| panic!("classification error: {e}"));
    mock.assert();
}

#[rstest]
fn classification_without_topk_omits_the_field(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/text_classification").json_body(json!({
            "text": "世界那么大，我想去看看",
            "language": "zh",
        }));
        then.status(200).json_body(json!({ "旅游": 0.8 }));
    });
    client
        .text_classification("世界那么大，我想去看看", &CallOptions::new())
        .unwrap_or_else(|e| panic!("classification error: {e}"));
    mock.assert();
}

#[rstest]
fn style_transfer_sends_the_target_style(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/text_style_transfer").json_body(json!({
            "text": "国家对中石油抱有很大的期望.",
            "language": "zh",
            "target_style": "gov_doc",
        }));
        then.status(200).body("国家对中国石油寄予厚望。");
    });
    client
        .text_style_transfer("国家对中石油抱有很大的期望.", "gov_doc", &CallOptions::new())
        .unwrap_or_else(|e| panic!("style transfer error: {e}"));
    mock.assert();
}

#[rstest]
fn correction_and_sentiment_take_the_plain_body(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    let correction = server.mock(|when, then| {
        when.method(POST)
            .path("/grammatical_error_correction")
            .json_body(json!({
                "text": ["每个青年都应当有远大的报复。"],
                "language": "zh",
            }));
        then.status(200).json_body(json!(["每个青年都应当有远大的抱负。"]));
    });
    let sentiment = server.mock(|when, then| {
        when.method(POST).path("/sentiment_analysis").json_body(json!({
            "text": "这家酒店很不错",
            "language": "zh",
        }));
        then.status(200).json_body(json!(0.96));
    });
    client
        .grammatical_error_correction(
            vec!["每个青年都应当有远大的报复。".to_owned()],
            &CallOptions::new(),
        )
        .unwrap_or_else(|e| panic!("correction error: {e}"));
    client
        .sentiment_analysis("这家酒店很不错", &CallOptions::new())
        .unwrap_or_else(|e| panic!("sentiment error: {e}"));
    correction.assert();
    sentiment.assert();
}

#[rstest]
fn about_is_a_get_round_trip(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    server.mock(|when, then| {
        when.method(GET).path("/about").header("accept", "application/json");
        then.status(200).body("HanLP RESTful API");
    });
    let body = client.about().unwrap_or_else(|e| panic!("about error: {e}"));
    assert_eq!(body, "HanLP RESTful API");
}

#[rstest]
fn per_call_language_overrides_the_configuration(client: (HanlpClient, MockServer)) {
    let (client, server) = client;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/parse").json_body(json!({
            "text": "In 2021, HanLP settled in Beijing.",
            "language": "mul",
        }));
        then.status(200).json_body(json!({}));
    });
    client
        .parse(
            "In 2021, HanLP settled in Beijing.",
            &CallOptions::new().with_language("mul"),
        )
        .unwrap_or_else(|e| panic!("parse error: {e}"));
    mock.assert();
}
