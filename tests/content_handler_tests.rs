
use portfolio_content::{errors::AppError, gateways::content::MockContentGateway};
use serde_json::json;
use test_utils::{raw_blog, raw_project, raw_skill, test_content_handler};

#[actix_rt::test]
async fn list_projects_normalizes_records_in_store_order() {
    let mut gateway = MockContentGateway::new();
    let records = vec![raw_project("p1"), raw_project("p2")];
    gateway
        .expect_fetch_projects()
        .returning(move || Ok(records.clone()));

    let handler = test_content_handler(gateway);
    let projects = handler.list_projects().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].id, "p1");
    assert_eq!(projects[1].id, "p2");
    assert_eq!(
        projects[0].cover_image_url.as_deref(),
        Some("https://cdn.example.com/shot-1.png")
    );
    assert_eq!(projects[0].image_count, 2);
}

#[actix_rt::test]
async fn malformed_records_are_skipped_not_fatal() {
    let mut gateway = MockContentGateway::new();
    let records = vec![raw_project("p1"), json!({"_id": "p2"}), raw_project("p3")];
    gateway
        .expect_fetch_projects()
        .returning(move || Ok(records.clone()));

    let handler = test_content_handler(gateway);
    let projects = handler.list_projects().await.unwrap();

    let ids: Vec<_> = projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p3"]);
    assert_eq!(handler.metrics().records_skipped(), 1);
}

#[actix_rt::test]
async fn unresolvable_image_entries_are_dropped_silently() {
    let mut gateway = MockContentGateway::new();
    let record = json!({
        "_id": "p1",
        "title": "Project One",
        "description": "desc",
        "images": ["https://cdn.example.com/keep.png", {"bogus": true}, "/relative.png"],
    });
    gateway
        .expect_fetch_project_by_id()
        .returning(move |_| Ok(Some(record.clone())));

    let handler = test_content_handler(gateway);
    let project = handler.get_project_by_id("p1", None).await.unwrap();

    assert_eq!(project.images.len(), 1);
    assert_eq!(project.images[0].url, "https://cdn.example.com/keep.png");
    assert_eq!(handler.metrics().images_dropped(), 2);
}

#[actix_rt::test]
async fn missing_project_maps_to_not_found() {
    let mut gateway = MockContentGateway::new();
    gateway.expect_fetch_project_by_id().returning(|_| Ok(None));

    let handler = test_content_handler(gateway);
    let err = handler.get_project_by_id("nope", None).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn malformed_single_entity_is_a_content_error() {
    let mut gateway = MockContentGateway::new();
    gateway
        .expect_fetch_project_by_id()
        .returning(|_| Ok(Some(json!({"_id": "p1"}))));

    let handler = test_content_handler(gateway);
    let err = handler.get_project_by_id("p1", None).await.unwrap_err();

    assert!(matches!(err, AppError::MalformedContent(_)));
}

#[actix_rt::test]
async fn blog_posts_are_listed_newest_first_regardless_of_store_order() {
    let mut gateway = MockContentGateway::new();
    let records = vec![
        raw_blog("b1", "oldest", "2023-01-01T00:00:00Z"),
        raw_blog("b2", "newest", "2024-06-01T00:00:00Z"),
        raw_blog("b3", "middle", "2024-01-01T00:00:00Z"),
    ];
    gateway
        .expect_fetch_blog_posts()
        .returning(move || Ok(records.clone()));

    let handler = test_content_handler(gateway);
    let posts = handler.list_blog_posts(1, 10).await.unwrap();

    let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["newest", "middle", "oldest"]);
}

#[actix_rt::test]
async fn blog_listing_is_paginated() {
    let mut gateway = MockContentGateway::new();
    let records: Vec<_> = (1..=5)
        .map(|n| raw_blog(&format!("b{n}"), &format!("post-{n}"), &format!("2024-01-0{n}T00:00:00Z")))
        .collect();
    gateway
        .expect_fetch_blog_posts()
        .returning(move || Ok(records.clone()));

    let handler = test_content_handler(gateway);
    let page_two = handler.list_blog_posts(2, 2).await.unwrap();

    let slugs: Vec<_> = page_two.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["post-3", "post-2"]);

    let past_the_end = handler.list_blog_posts(9, 2).await.unwrap();
    assert!(past_the_end.is_empty());
}

#[actix_rt::test]
async fn recent_posts_honor_the_limit() {
    let mut gateway = MockContentGateway::new();
    let records: Vec<_> = (1..=5)
        .map(|n| raw_blog(&format!("b{n}"), &format!("post-{n}"), &format!("2024-01-0{n}T00:00:00Z")))
        .collect();
    gateway
        .expect_fetch_blog_posts()
        .returning(move || Ok(records.clone()));

    let handler = test_content_handler(gateway);
    let recent = handler.recent_blog_posts(2).await.unwrap();

    let slugs: Vec<_> = recent.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["post-5", "post-4"]);
}

#[actix_rt::test]
async fn blog_detail_carries_read_time_and_rendered_content() {
    let mut gateway = MockContentGateway::new();
    let mut record = raw_blog("b1", "long-read", "2024-01-01T00:00:00Z");
    record["content"] = json!("<p>".to_string() + &"word ".repeat(450) + "</p>");
    gateway
        .expect_fetch_blog_post_by_slug()
        .returning(move |_| Ok(Some(record.clone())));

    let handler = test_content_handler(gateway);
    let post = handler.get_blog_post_by_slug("long-read", None).await.unwrap();

    assert_eq!(post.read_time_minutes, 3);
    assert!(post.content_html.contains("word"));
    assert!(!post.content_html.contains("<script"));
}

#[actix_rt::test]
async fn missing_blog_post_maps_to_not_found() {
    let mut gateway = MockContentGateway::new();
    gateway
        .expect_fetch_blog_post_by_slug()
        .returning(|_| Ok(None));

    let handler = test_content_handler(gateway);
    let err = handler
        .get_blog_post_by_slug("missing", None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn detail_carousel_wraps_the_requested_index() {
    let mut gateway = MockContentGateway::new();
    let record = raw_blog("b1", "gallery", "2024-01-01T00:00:00Z");
    gateway
        .expect_fetch_blog_post_by_slug()
        .returning(move |_| Ok(Some(record.clone())));

    let handler = test_content_handler(gateway);

    // Three images; index 4 wraps to 1.
    let post = handler
        .get_blog_post_by_slug("gallery", Some(4))
        .await
        .unwrap();
    let carousel = post.carousel.unwrap();
    assert_eq!(carousel.length, 3);
    assert_eq!(carousel.current, Some(1));
    assert_eq!(carousel.next, Some(2));
    assert_eq!(carousel.previous, Some(0));

    let post = handler.get_blog_post_by_slug("gallery", None).await.unwrap();
    assert_eq!(post.carousel.unwrap().current, Some(0));
}

#[actix_rt::test]
async fn entity_without_images_has_no_carousel() {
    let mut gateway = MockContentGateway::new();
    let record = json!({
        "_id": "p1",
        "title": "No gallery",
        "description": "desc",
        "images": [],
    });
    gateway
        .expect_fetch_project_by_id()
        .returning(move |_| Ok(Some(record.clone())));

    let handler = test_content_handler(gateway);
    let project = handler.get_project_by_id("p1", Some(2)).await.unwrap();

    assert!(project.images.is_empty());
    assert!(project.carousel.is_none());
}

#[actix_rt::test]
async fn skills_keep_their_resolved_icons() {
    let mut gateway = MockContentGateway::new();
    let records = vec![
        raw_skill("s1", "Rust"),
        json!({"_id": "s2", "name": "Go", "image": {"hotspot": {}}}),
    ];
    gateway
        .expect_fetch_skills()
        .returning(move || Ok(records.clone()));

    let handler = test_content_handler(gateway);
    let skills = handler.list_skills().await.unwrap();

    assert_eq!(skills.len(), 2);
    assert_eq!(
        skills[0].image.as_ref().map(|i| i.url.as_str()),
        Some("https://cdn.example.com/icon.png")
    );
    assert!(skills[1].image.is_none());
    assert_eq!(handler.metrics().images_dropped(), 1);
}

#[actix_rt::test]
async fn portfolio_overview_aggregates_all_sections() {
    let mut gateway = MockContentGateway::new();
    let projects = vec![raw_project("p1")];
    let posts = vec![
        raw_blog("b1", "one", "2024-01-01T00:00:00Z"),
        raw_blog("b2", "two", "2024-02-01T00:00:00Z"),
        raw_blog("b3", "three", "2024-03-01T00:00:00Z"),
        raw_blog("b4", "four", "2024-04-01T00:00:00Z"),
    ];
    let skills = vec![raw_skill("s1", "Rust")];
    gateway
        .expect_fetch_projects()
        .returning(move || Ok(projects.clone()));
    gateway
        .expect_fetch_blog_posts()
        .returning(move || Ok(posts.clone()));
    gateway
        .expect_fetch_skills()
        .returning(move || Ok(skills.clone()));

    let handler = test_content_handler(gateway);
    let overview = handler.portfolio_overview().await.unwrap();

    assert_eq!(overview.projects.len(), 1);
    assert_eq!(overview.skills.len(), 1);
    // The overview carries only the newest three posts.
    let slugs: Vec<_> = overview.recent_posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["four", "three", "two"]);
}

#[actix_rt::test]
async fn gateway_failures_propagate_as_bad_gateway() {
    let mut gateway = MockContentGateway::new();
    gateway
        .expect_fetch_projects()
        .returning(|| Err(AppError::BadGateway("store unreachable".to_string())));

    let handler = test_content_handler(gateway);
    let err = handler.list_projects().await.unwrap_err();

    assert!(matches!(err, AppError::BadGateway(_)));
}
