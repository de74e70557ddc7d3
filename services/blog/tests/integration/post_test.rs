use quill_blog::domain::types::{NewPost, PostFilter};
use quill_blog::error::BlogServiceError;
use quill_blog::usecase::category::{CreateCategoryUseCase, UpdateCategoryUseCase};
use quill_blog::usecase::post::{CreatePostUseCase, GetPostUseCase, ListPostsUseCase};
use quill_domain::pagination::PageRequest;

use crate::helpers::{MockCategoryRepo, MockLikeRepo, MockPostRepo, test_category, test_post};

fn new_post(category_id: i64) -> NewPost {
    NewPost {
        title: "Lifetimes".to_owned(),
        description: "Elision rules, explained.".to_owned(),
        image_url: Some("/media/cover.png".to_owned()),
        user_id: 1,
        category_id,
    }
}

#[tokio::test]
async fn should_create_post_in_existing_category() {
    let posts = MockPostRepo::empty();
    let uc = CreatePostUseCase {
        posts: posts.clone(),
        categories: MockCategoryRepo {
            categories: vec![test_category()],
        },
    };

    let post = uc.execute(new_post(test_category().id)).await.unwrap();
    assert_eq!(post.views_count, 0);
    assert_eq!(posts.posts_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_post_for_missing_category() {
    let uc = CreatePostUseCase {
        posts: MockPostRepo::empty(),
        categories: MockCategoryRepo { categories: vec![] },
    };

    let result = uc.execute(new_post(99)).await;
    assert!(
        matches!(result, Err(BlogServiceError::CategoryNotFound)),
        "expected CategoryNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_count_a_view_on_every_read() {
    let posts = MockPostRepo::new(vec![test_post()]);
    let uc = GetPostUseCase {
        posts: posts.clone(),
        likes: MockLikeRepo::default(),
    };

    uc.execute(1).await.unwrap();
    let second = uc.execute(1).await.unwrap();
    assert_eq!(second.post.views_count, 2);

    let missing = uc.execute(2).await;
    assert!(
        matches!(missing, Err(BlogServiceError::PostNotFound)),
        "expected PostNotFound, got {missing:?}"
    );
}

#[tokio::test]
async fn should_clamp_page_size_when_listing() {
    let many = (1..=150)
        .map(|id| {
            let mut post = test_post();
            post.id = id;
            post
        })
        .collect();
    let uc = ListPostsUseCase {
        posts: MockPostRepo::new(many),
    };

    let page = uc
        .execute(
            PostFilter::default(),
            PageRequest {
                limit: 1000,
                page: 0,
            },
        )
        .await
        .unwrap();
    assert_eq!(page.items.len(), 100);
    assert_eq!(page.count, 150);
    assert_eq!(page.items[0].id, 1);
}

#[tokio::test]
async fn should_validate_category_title() {
    let repo = MockCategoryRepo {
        categories: vec![test_category()],
    };

    let blank = CreateCategoryUseCase {
        categories: repo.clone(),
    }
    .execute("   ")
    .await;
    assert!(
        matches!(blank, Err(BlogServiceError::Validation(_))),
        "expected Validation, got {blank:?}"
    );

    let renamed = UpdateCategoryUseCase {
        categories: repo.clone(),
    }
    .execute(test_category().id, "  Systems  ")
    .await
    .unwrap();
    assert_eq!(renamed.title, "Systems");

    let missing = UpdateCategoryUseCase { categories: repo }
        .execute(42, "Systems")
        .await;
    assert!(
        matches!(missing, Err(BlogServiceError::CategoryNotFound)),
        "expected CategoryNotFound, got {missing:?}"
    );
}
