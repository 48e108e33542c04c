//! Unit tests for the Bedrock model invoker.

use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{BedrockConfig, BedrockModelInvoker, regional_endpoint, truncate_for_message};
use crate::ai::provider::ModelProvider;
use crate::ai::service::ModelInvoker;
use crate::error::DigestError;

struct BedrockServer {
    runtime: Runtime,
    server: MockServer,
}

impl BedrockServer {
    fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    fn invoker(&self, provider: ModelProvider) -> BedrockModelInvoker {
        BedrockModelInvoker::new(BedrockConfig::new(
            self.server.uri(),
            provider,
            Some("bedrock-key".to_owned()),
            Duration::from_secs(5),
        ))
    }
}

#[fixture]
fn bedrock() -> BedrockServer {
    let runtime = Runtime::new().expect("runtime should start");
    let server = runtime.block_on(MockServer::start());
    BedrockServer { runtime, server }
}

#[test]
fn invoke_requires_api_key() {
    let invoker = BedrockModelInvoker::default();

    let error = invoker
        .invoke("Summarise my week")
        .expect_err("missing key should be rejected");

    assert!(
        matches!(error, DigestError::Configuration { .. }),
        "expected missing API key to map to Configuration error, got {error:?}"
    );
}

#[rstest]
fn invoke_posts_provider_body_to_model_path(bedrock: BedrockServer) {
    bedrock.mount(
        Mock::given(method("POST"))
            .and(path("/model/meta.llama2-70b-chat-v1/invoke"))
            .and(header("authorization", "Bearer bedrock-key"))
            .and(body_json(json!({
                "prompt": "Summarise my week",
                "temperature": 0.3,
                "top_p": 0.3,
                "max_gen_len": 1000
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "generation": "You fixed the sampler." })),
            )
            .expect(1),
    );

    let completion = bedrock
        .invoker(ModelProvider::Llama2)
        .invoke("Summarise my week")
        .expect("invocation should succeed");

    assert_eq!(completion, "You fixed the sampler.");
    bedrock.runtime.block_on(bedrock.server.verify());
}

#[rstest]
fn invoke_reads_first_claude_text_block(bedrock: BedrockServer) {
    bedrock.mount(
        Mock::given(method("POST"))
            .and(path("/model/anthropic.claude-3-sonnet-20240229-v1:0/invoke"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_01",
                "type": "message",
                "role": "assistant",
                "content": [{ "type": "text", "text": "You attended two meetings." }],
                "stop_reason": "end_turn"
            }))),
    );

    let completion = bedrock
        .invoker(ModelProvider::Claude3)
        .invoke("Summarise my week")
        .expect("invocation should succeed");

    assert_eq!(completion, "You attended two meetings.");
}

#[rstest]
fn invoke_maps_failure_status_to_model_error(bedrock: BedrockServer) {
    bedrock.mount(
        Mock::given(method("POST"))
            .and(path("/model/ai21.j2-ultra-v1/invoke"))
            .respond_with(
                ResponseTemplate::new(403).set_body_string("You don't have access to the model"),
            ),
    );

    let error = bedrock
        .invoker(ModelProvider::Jurassic2)
        .invoke("Summarise my week")
        .expect_err("403 should fail");

    let DigestError::Model { message } = &error else {
        panic!("expected Model error, got {error:?}");
    };
    assert!(message.contains("403"), "{message}");
    assert!(message.contains("jurassic2"), "{message}");
}

#[test]
fn regional_endpoint_embeds_region() {
    assert_eq!(
        regional_endpoint("eu-west-1"),
        "https://bedrock-runtime.eu-west-1.amazonaws.com"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let config = BedrockConfig {
        api_key: Some("secret-key".to_owned()),
        ..BedrockConfig::default()
    };

    assert!(!format!("{config:?}").contains("secret-key"));
}

#[rstest]
#[case::short("abc", 5, "abc")]
#[case::exact("abcde", 5, "abcde")]
#[case::long("abcdefgh", 5, "abcde...")]
fn truncate_for_message_limits_characters(
    #[case] input: &str,
    #[case] max_chars: usize,
    #[case] expected: &str,
) {
    assert_eq!(truncate_for_message(input, max_chars), expected);
}
