use quill_blog::domain::types::LikeCounts;
use quill_blog::error::BlogServiceError;
use quill_blog::usecase::like::{GetLikeUseCase, ToggleLikeInput, ToggleLikeUseCase};
use quill_blog::usecase::post::GetPostUseCase;
use quill_domain::like::LikeOutcome;

use crate::helpers::{MockLikeRepo, MockPostRepo, test_post};

fn toggle(likes: &MockLikeRepo) -> ToggleLikeUseCase<MockLikeRepo, MockPostRepo> {
    ToggleLikeUseCase {
        likes: likes.clone(),
        posts: MockPostRepo::new(vec![test_post()]),
    }
}

fn input(user_id: i64, status: bool) -> ToggleLikeInput {
    ToggleLikeInput {
        user_id,
        post_id: test_post().id,
        status,
    }
}

#[tokio::test]
async fn should_cancel_out_repeated_like() {
    let likes = MockLikeRepo::default();
    let uc = toggle(&likes);

    assert_eq!(uc.execute(input(1, true)).await.unwrap(), LikeOutcome::Created);
    assert_eq!(uc.execute(input(1, true)).await.unwrap(), LikeOutcome::Removed);
    assert!(likes.likes_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_flip_like_to_dislike_in_place() {
    let likes = MockLikeRepo::default();
    let uc = toggle(&likes);

    uc.execute(input(1, true)).await.unwrap();
    let first_id = likes.likes_handle().lock().unwrap()[0].id;
    assert_eq!(uc.execute(input(1, false)).await.unwrap(), LikeOutcome::Updated);

    let rows = likes.likes_handle();
    let rows = rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].status);
    assert_eq!(rows[0].id, first_id);
}

#[tokio::test]
async fn should_count_likes_and_dislikes_per_user() {
    let likes = MockLikeRepo::default();
    let uc = toggle(&likes);

    for user_id in 1..=4 {
        uc.execute(input(user_id, true)).await.unwrap();
    }
    for user_id in 5..=7 {
        uc.execute(input(user_id, false)).await.unwrap();
    }

    let found = GetPostUseCase {
        posts: MockPostRepo::new(vec![test_post()]),
        likes: likes.clone(),
    }
    .execute(test_post().id)
    .await
    .unwrap();
    assert_eq!(
        found.likes,
        LikeCounts {
            likes: 4,
            dislikes: 3
        }
    );
    assert_eq!(found.post.views_count, 1);
}

#[tokio::test]
async fn should_reject_like_for_missing_post() {
    let likes = MockLikeRepo::default();
    let uc = ToggleLikeUseCase {
        likes: likes.clone(),
        posts: MockPostRepo::empty(),
    };

    let result = uc.execute(input(1, true)).await;
    assert!(
        matches!(result, Err(BlogServiceError::PostNotFound)),
        "expected PostNotFound, got {result:?}"
    );
    assert!(likes.likes_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_stored_like_for_user_and_post() {
    let likes = MockLikeRepo::default();
    toggle(&likes).execute(input(3, false)).await.unwrap();

    let uc = GetLikeUseCase {
        likes: likes.clone(),
    };
    let like = uc.execute(3, test_post().id).await.unwrap();
    assert_eq!(like.user_id, 3);
    assert!(!like.status);

    let missing = uc.execute(4, test_post().id).await;
    assert!(
        matches!(missing, Err(BlogServiceError::LikeNotFound)),
        "expected LikeNotFound, got {missing:?}"
    );
}
