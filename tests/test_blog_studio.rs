use blogforge::writers::GroqWriter;
use blogforge::{BlogError, BlogStudio, BlogStyle, DraftRequest, GenerationMethod};
use mockito::{Matcher, Server};
use std::sync::Arc;

const POST: &str = "## Introduction\nWhy tea matters.\n\n## History\nOld.\n\n## Varieties\nMany.\n\n## Brewing\nHot water.\n\n## Conclusion\nDrink it.";

fn completion(content: &str) -> String {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

#[tokio::test]
async fn test_draft_and_finalize_through_groq() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .match_header("authorization", "Bearer groq-key")
        .match_body(Matcher::PartialJsonString(
            r#"{"model": "llama-3.1-8b-instant"}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(POST))
        .expect(3)
        .create_async()
        .await;

    let writer = GroqWriter::with_base_url(
        "groq-key".to_string(),
        server.url(),
        "llama-3.1-8b-instant".to_string(),
    );
    let studio = BlogStudio::new(Arc::new(writer), None).with_workers(2);

    let request = DraftRequest {
        title: "Tea".to_string(),
        description: None,
        method: GenerationMethod::Quick,
        with_images: true,
    };
    let drafts = studio.draft(&request).await.unwrap();

    assert_eq!(drafts.len(), 3);
    assert_eq!(
        drafts.iter().map(|d| d.style).collect::<Vec<_>>(),
        BlogStyle::ALL.to_vec()
    );
    assert_eq!(
        drafts.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(drafts.iter().all(|d| d.images.is_empty()));
    assert_eq!(drafts[0].preview, drafts[0].content_md);
    mock.assert_async().await;

    let blog = studio
        .finalize("Tea", "All about tea", &drafts[1].content_md, false)
        .await
        .unwrap();
    assert_eq!(blog.sections.len(), 5);
    assert_eq!(blog.sections[0].heading, "Introduction");
    assert_eq!(blog.sections[4].body, "Drink it.");
    assert!(blog.featured_image.is_none());
    assert!(blog.content_images.is_empty());
}

#[tokio::test]
async fn test_detailed_draft_requires_description() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let writer =
        GroqWriter::with_base_url("groq-key".to_string(), server.url(), "model".to_string());
    let studio = BlogStudio::new(Arc::new(writer), None);

    let request = DraftRequest {
        title: "Tea".to_string(),
        description: Some("   ".to_string()),
        method: GenerationMethod::Detailed,
        with_images: false,
    };
    let result = studio.draft(&request).await;

    assert!(matches!(result, Err(BlogError::InvalidInput(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_error_names_failed_variation() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .with_status(429)
        .with_body("rate limited")
        .create_async()
        .await;

    let writer =
        GroqWriter::with_base_url("groq-key".to_string(), server.url(), "model".to_string());
    let studio = BlogStudio::new(Arc::new(writer), None).with_workers(1);

    let request = DraftRequest {
        title: "Tea".to_string(),
        description: Some("Green and black teas".to_string()),
        method: GenerationMethod::Detailed,
        with_images: false,
    };
    let err = studio.draft(&request).await.unwrap_err();

    match err {
        BlogError::Variation { variation, source } => {
            assert_eq!(variation, 1);
            assert!(source.to_string().contains("rate limited"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
