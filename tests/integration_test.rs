use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use httpmock::prelude::*;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

mod common;

// ============================================================================
// DISPATCH: tool calls routed through DreamshotServer against a mock API
// ============================================================================

mod dispatch {
    use super::*;

    #[tokio::test]
    async fn test_generate_then_status_then_media() {
        let api = MockServer::start_async().await;

        let generate = api
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/v1/generations")
                    .header("authorization", "Bearer dst_integration")
                    .json_body(json!({
                        "tool": "ai_edit",
                        "variant": "ultra",
                        "params": { "prompt": "add sunglasses" },
                        "imageUrls": ["https://cdn.example.com/face.png"]
                    }));
                then.status(200).json_body(json!({
                    "generationId": "gen_int",
                    "status": "processing",
                    "tool": "ai_edit",
                    "variant": "ultra"
                }));
            })
            .await;

        let mut completed = common::status_body("completed");
        completed["mediaItems"] = json!([{
            "id": "m1",
            "displayUrl": "https://cdn.example.com/out.webp",
            "mediaKind": "image",
            "resolution": "1024x1024"
        }]);
        let status = api
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/generations/gen_int");
                then.status(200).json_body(completed.clone());
            })
            .await;

        let media = api
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/generations/gen_int/media");
                then.status(200).json_body(json!({
                    "generationId": "gen_int",
                    "media": [{
                        "id": "m1",
                        "displayUrl": "https://cdn.example.com/out.webp",
                        "downloadUrl": "https://cdn.example.com/out.png?sig=1",
                        "mediaKind": "image",
                        "resolution": "1024x1024"
                    }]
                }));
            })
            .await;

        let server = common::server_for(&api);

        let result = server
            .dispatch(
                "dreamshot_generate",
                common::args(json!({
                    "tool": "ai_edit",
                    "variant": "ultra",
                    "prompt": "add sunglasses",
                    "imageUrls": ["https://cdn.example.com/face.png"]
                })),
            )
            .await;
        assert_eq!(result.is_error, Some(false));
        let started = common::result_json(&result);
        let generation_id = started["generationId"].as_str().unwrap().to_string();

        let result = server
            .dispatch(
                "dreamshot_status",
                common::args(json!({ "generationId": generation_id })),
            )
            .await;
        assert_eq!(result.is_error, Some(false));
        let json = common::result_json(&result);
        assert_eq!(json["status"], "completed");
        assert_eq!(json["mediaItems"].as_array().unwrap().len(), 1);

        let result = server
            .dispatch(
                "dreamshot_media",
                common::args(json!({ "generationId": generation_id })),
            )
            .await;
        assert_eq!(result.is_error, Some(false));
        let json = common::result_json(&result);
        assert_eq!(json["mediaCount"], 1);
        assert_eq!(json["media"][0]["downloadUrl"], "https://cdn.example.com/out.png?sig=1");

        generate.assert_async().await;
        status.assert_async().await;
        media.assert_async().await;
    }

    #[tokio::test]
    async fn test_mapped_error_from_every_tool() {
        let api = MockServer::start_async().await;
        api.mock_async(|when, then| {
            when.path_contains("/api/v1/");
            then.status(402).json_body(json!({
                "error": "insufficient_credits",
                "message": "Not enough credits"
            }));
        })
        .await;

        let server = common::server_for(&api);
        let calls = [
            ("dreamshot_list_tools", json!({})),
            ("dreamshot_generate", json!({ "tool": "ai_edit" })),
            ("dreamshot_status", json!({ "generationId": "gen_int" })),
            ("dreamshot_media", json!({ "generationId": "gen_int" })),
            ("dreamshot_credits", json!({})),
        ];

        for (name, arguments) in calls {
            let result = server.dispatch(name, common::args(arguments)).await;
            assert_eq!(result.is_error, Some(true), "{}", name);

            let text = common::result_text(&result);
            assert!(text.contains("402"), "{}: {}", name, text);
            assert!(text.contains("insufficient_credits"), "{}: {}", name, text);
            assert!(text.contains("Not enough credits"), "{}: {}", name, text);
        }
    }

    #[tokio::test]
    async fn test_unreachable_api_is_generic_error() {
        let config = dreamshot_mcp::config::ApiConfig::new(common::TEST_API_KEY)
            .with_base_url("http://127.0.0.1:1/api/v1");
        let server =
            dreamshot_mcp::DreamshotServer::new(dreamshot_mcp::DreamshotClient::new(&config).unwrap());

        let result = server.dispatch("dreamshot_credits", None).await;

        assert_eq!(result.is_error, Some(true));
        let json = common::result_json(&result);
        assert!(json["message"].as_str().unwrap().starts_with("HTTP error"));
        assert!(json.get("status").is_none());
    }

    #[tokio::test]
    async fn test_unknown_tool_names_the_tool() {
        let api = MockServer::start_async().await;
        let server = common::server_for(&api);

        let result = server.dispatch("dreamshot_upscale", None).await;

        assert_eq!(result.is_error, Some(true));
        assert!(common::result_text(&result).contains("dreamshot_upscale"));
    }

    #[tokio::test]
    async fn test_wait_for_completion_through_client() {
        let api = MockServer::start_async().await;
        api.mock_async(|when, then| {
            when.method(GET).path("/api/v1/generations/gen_int");
            then.status(200).json_body(common::status_body("failed"));
        })
        .await;

        let config = dreamshot_mcp::config::ApiConfig::new(common::TEST_API_KEY)
            .with_base_url(api.url("/api/v1"));
        let client = dreamshot_mcp::DreamshotClient::new(&config).unwrap();

        let status = client
            .wait_for_completion(
                "gen_int",
                dreamshot_mcp::client::WaitOptions::default()
                    .with_poll_interval(std::time::Duration::from_millis(10)),
            )
            .await
            .unwrap();

        assert_eq!(status.status, dreamshot_mcp::client::GenerationStatus::Failed);
    }
}

// ============================================================================
// PROTOCOL: full MCP session over an in-memory duplex stream
// ============================================================================

mod protocol {
    use super::*;
    use rmcp::ServiceExt;
    use rmcp::model::{CallToolRequestParams, PaginatedRequestParams};

    #[tokio::test]
    async fn test_list_and_call_over_mcp() {
        let api = MockServer::start_async().await;
        api.mock_async(|when, then| {
            when.method(GET).path("/api/v1/credits");
            then.status(200).json_body(json!({
                "organizationId": "org_int",
                "credits": 42
            }));
        })
        .await;

        let server = common::server_for(&api);
        let (server_io, client_io) = tokio::io::duplex(64 * 1024);

        let server_task = tokio::spawn(async move {
            let running = server.serve(server_io).await?;
            running.waiting().await?;
            anyhow::Ok(())
        });

        let client = ().serve(client_io).await.unwrap();

        let info = client.peer_info().unwrap();
        assert_eq!(info.server_info.name, "dreamshot-mcp-server");

        let tools = client
            .list_tools(Some(PaginatedRequestParams {
                meta: None,
                cursor: None,
            }))
            .await
            .unwrap();
        let names: Vec<String> = tools.tools.iter().map(|t| t.name.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "dreamshot_list_tools",
                "dreamshot_generate",
                "dreamshot_status",
                "dreamshot_media",
                "dreamshot_credits",
            ]
        );

        let result = client
            .call_tool(CallToolRequestParams {
                meta: None,
                name: "dreamshot_credits".into(),
                arguments: None,
                task: None,
            })
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(common::result_json(&result)["credits"], 42);

        let result = client
            .call_tool(CallToolRequestParams {
                meta: None,
                name: "dreamshot_nope".into(),
                arguments: None,
                task: None,
            })
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));

        client.cancel().await.unwrap();
        server_task.abort();
    }
}

// ============================================================================
// HTTP: routes served alongside the streamable MCP endpoint
// ============================================================================

mod http {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let api = MockServer::start_async().await;
        let app = dreamshot_mcp::api::build_router(
            common::server_for(&api),
            CancellationToken::new(),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = common::response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "dreamshot-mcp-server");
    }

    #[tokio::test]
    async fn test_info_endpoint() {
        let api = MockServer::start_async().await;
        let app = dreamshot_mcp::api::build_router(
            common::server_for(&api),
            CancellationToken::new(),
        );

        let response = app
            .oneshot(Request::builder().uri("/info").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = common::response_json(response).await;
        assert_eq!(json["name"], "dreamshot-mcp");
        assert!(json["version"].is_string());
        assert!(json["apiBaseUrl"].as_str().unwrap().ends_with("/api/v1"));
        assert_eq!(json["tools"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let api = MockServer::start_async().await;
        let app = dreamshot_mcp::api::build_router(
            common::server_for(&api),
            CancellationToken::new(),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
