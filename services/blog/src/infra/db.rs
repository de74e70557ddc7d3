use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, FromQueryResult, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, Statement, TransactionTrait,
    sea_query::{Expr, Func},
};

use quill_blog_schema::{categories, comments, likes, posts, users};
use quill_domain::like::LikeOutcome;
use quill_domain::pagination::{Page, PageRequest, Sort};
use quill_domain::user::UserRole;

use crate::domain::repository::{
    CategoryRepository, CommentRepository, LikeRepository, PostRepository, UserRepository,
};
use crate::domain::types::{
    Category, Comment, CommentAuthor, CommentFilter, Like, LikeCounts, NewComment, NewPost,
    NewUser, Post, PostFilter, User,
};
use crate::error::BlogServiceError;

/// Case-insensitive substring match against any of `columns`.
fn contains_ci<C: ColumnTrait>(columns: &[C], term: &str) -> Condition {
    let pattern = format!("%{}%", term.to_lowercase());
    columns.iter().fold(Condition::any(), |cond, col| {
        cond.add(Expr::expr(Func::lower(Expr::col(*col))).like(pattern.clone()))
    })
}

fn order_of(sort: Sort) -> Order {
    match sort {
        Sort::Desc => Order::Desc,
        Sort::Asc => Order::Asc,
    }
}

/// Postgres names single-column unique constraints `<table>_<column>_key`.
const USERS_EMAIL_KEY: &str = "users_email_key";
const USERS_USERNAME_KEY: &str = "users_username_key";

/// Maps a unique violation on `users` to the conflicting field.
fn user_unique_violation(message: &str) -> Option<BlogServiceError> {
    if message.contains(USERS_EMAIL_KEY) {
        Some(BlogServiceError::EmailExists)
    } else if message.contains(USERS_USERNAME_KEY) {
        Some(BlogServiceError::UsernameExists)
    } else {
        None
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, BlogServiceError> {
        let result = users::ActiveModel {
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            phone_number: Set(user.phone_number.clone()),
            email: Set(user.email.clone()),
            gender: Set(user.gender.clone()),
            password: Set(user.password_hash.clone()),
            username: Set(user.username.clone()),
            profile_image_url: Set(user.profile_image_url.clone()),
            role: Set(user.role.as_str().to_owned()),
            active: Set(user.active),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(model) => user_from_model(model),
            Err(e) => match e.sql_err() {
                // Two verifies racing for one email: the unique index picks the winner.
                Some(SqlErr::UniqueConstraintViolation(message)) => {
                    Err(user_unique_violation(&message)
                        .unwrap_or_else(|| anyhow::Error::new(e).context("create user").into()))
                }
                _ => Err(anyhow::Error::new(e).context("create user").into()),
            },
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, BlogServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, BlogServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<User>, BlogServiceError> {
        let mut query = users::Entity::find();
        if let Some(term) = search {
            query = query.filter(contains_ci(
                &[
                    users::Column::FirstName,
                    users::Column::LastName,
                    users::Column::Email,
                    users::Column::Username,
                ],
                term,
            ));
        }

        let count = query.clone().count(&self.db).await.context("count users")?;
        let models = query
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list users")?;

        Ok(Page {
            items: models
                .into_iter()
                .map(user_from_model)
                .collect::<Result<_, _>>()?,
            count,
        })
    }

    async fn update_password(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<bool, BlogServiceError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::Password, Expr::value(password_hash.to_owned()))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update user password")?;
        Ok(result.rows_affected > 0)
    }

    async fn activate(&self, id: i64, password_hash: &str) -> Result<User, BlogServiceError> {
        let models = users::Entity::update_many()
            .col_expr(users::Column::Password, Expr::value(password_hash.to_owned()))
            .col_expr(users::Column::Active, Expr::value(true))
            .filter(users::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .context("activate user")?;
        models
            .into_iter()
            .next()
            .ok_or(BlogServiceError::UserNotFound)
            .and_then(user_from_model)
    }
}

fn user_from_model(model: users::Model) -> Result<User, BlogServiceError> {
    let role = model
        .role
        .parse::<UserRole>()
        .context("decode user role")?;
    Ok(User {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        phone_number: model.phone_number,
        email: model.email,
        gender: model.gender,
        password_hash: model.password,
        username: model.username,
        profile_image_url: model.profile_image_url,
        role,
        active: model.active,
        created_at: model.created_at,
    })
}

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn create(&self, title: &str) -> Result<Category, BlogServiceError> {
        let model = categories::ActiveModel {
            title: Set(title.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create category")?;
        Ok(category_from_model(model))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, BlogServiceError> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find category by id")?;
        Ok(model.map(category_from_model))
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Category>, BlogServiceError> {
        let mut query = categories::Entity::find();
        if let Some(term) = search {
            query = query.filter(contains_ci(&[categories::Column::Title], term));
        }

        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count categories")?;
        let models = query
            .order_by_desc(categories::Column::CreatedAt)
            .order_by_desc(categories::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list categories")?;

        Ok(Page {
            items: models.into_iter().map(category_from_model).collect(),
            count,
        })
    }

    async fn update(&self, id: i64, title: &str) -> Result<Option<Category>, BlogServiceError> {
        let models = categories::Entity::update_many()
            .col_expr(categories::Column::Title, Expr::value(title.to_owned()))
            .filter(categories::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .context("update category")?;
        Ok(models.into_iter().next().map(category_from_model))
    }

    async fn delete(&self, id: i64) -> Result<bool, BlogServiceError> {
        match categories::Entity::delete_by_id(id).exec(&self.db).await {
            Ok(result) => Ok(result.rows_affected > 0),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) => {
                Err(BlogServiceError::CategoryInUse)
            }
            Err(e) => Err(anyhow::Error::new(e).context("delete category").into()),
        }
    }
}

fn category_from_model(model: categories::Model) -> Category {
    Category {
        id: model.id,
        title: model.title,
        created_at: model.created_at,
    }
}

// ── Post repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPostRepository {
    pub db: DatabaseConnection,
}

impl PostRepository for DbPostRepository {
    async fn create(&self, post: &NewPost) -> Result<Post, BlogServiceError> {
        let model = posts::ActiveModel {
            title: Set(post.title.clone()),
            description: Set(post.description.clone()),
            image_url: Set(post.image_url.clone()),
            user_id: Set(post.user_id),
            category_id: Set(post.category_id),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            views_count: Set(0),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create post")?;
        Ok(post_from_model(model))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, BlogServiceError> {
        let model = posts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find post by id")?;
        Ok(model.map(post_from_model))
    }

    async fn view(&self, id: i64) -> Result<Option<Post>, BlogServiceError> {
        let models = posts::Entity::update_many()
            .col_expr(
                posts::Column::ViewsCount,
                Expr::col(posts::Column::ViewsCount).add(1),
            )
            .filter(posts::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .context("increment post views")?;
        Ok(models.into_iter().next().map(post_from_model))
    }

    async fn list(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<Post>, BlogServiceError> {
        let mut cond = Condition::all()
            .add_option(filter.user_id.map(|id| posts::Column::UserId.eq(id)))
            .add_option(filter.category_id.map(|id| posts::Column::CategoryId.eq(id)));
        if let Some(term) = filter.search.as_deref() {
            cond = cond.add(contains_ci(&[posts::Column::Title], term));
        }
        let query = posts::Entity::find().filter(cond);

        let count = query.clone().count(&self.db).await.context("count posts")?;
        let order = order_of(filter.sort_by_date);
        let models = query
            .order_by(posts::Column::CreatedAt, order.clone())
            .order_by(posts::Column::Id, order)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list posts")?;

        Ok(Page {
            items: models.into_iter().map(post_from_model).collect(),
            count,
        })
    }
}

fn post_from_model(model: posts::Model) -> Post {
    Post {
        id: model.id,
        title: model.title,
        description: model.description,
        image_url: model.image_url,
        user_id: model.user_id,
        category_id: model.category_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
        views_count: model.views_count,
    }
}

// ── Comment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

impl CommentRepository for DbCommentRepository {
    async fn create(&self, comment: &NewComment) -> Result<Comment, BlogServiceError> {
        let model = comments::ActiveModel {
            user_id: Set(comment.user_id),
            post_id: Set(comment.post_id),
            description: Set(comment.description.clone()),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create comment")?;

        let author = users::Entity::find_by_id(model.user_id)
            .one(&self.db)
            .await
            .context("find comment author")?;
        Ok(comment_from_models(model, author))
    }

    async fn list(
        &self,
        filter: CommentFilter,
        page: PageRequest,
    ) -> Result<Page<Comment>, BlogServiceError> {
        let cond = Condition::all()
            .add_option(filter.user_id.map(|id| comments::Column::UserId.eq(id)))
            .add_option(filter.post_id.map(|id| comments::Column::PostId.eq(id)));

        let count = comments::Entity::find()
            .filter(cond.clone())
            .count(&self.db)
            .await
            .context("count comments")?;
        let rows = comments::Entity::find()
            .filter(cond)
            .find_also_related(users::Entity)
            .order_by_desc(comments::Column::CreatedAt)
            .order_by_desc(comments::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list comments")?;

        Ok(Page {
            items: rows
                .into_iter()
                .map(|(comment, author)| comment_from_models(comment, author))
                .collect(),
            count,
        })
    }
}

fn comment_from_models(model: comments::Model, author: Option<users::Model>) -> Comment {
    Comment {
        id: model.id,
        user_id: model.user_id,
        post_id: model.post_id,
        description: model.description,
        created_at: model.created_at,
        updated_at: model.updated_at,
        author: author.map(|u| CommentAuthor {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            profile_image_url: u.profile_image_url,
        }),
    }
}

// ── Like repository ──────────────────────────────────────────────────────────

/// Insert, or flip an opposite reaction. Returns nothing when the stored
/// status already equals the requested one; the conflicting row stays locked
/// until the surrounding transaction ends.
const TOGGLE_UPSERT_SQL: &str = r#"
    INSERT INTO likes (user_id, post_id, status)
    VALUES ($1, $2, $3)
    ON CONFLICT (user_id, post_id)
        DO UPDATE SET status = EXCLUDED.status
        WHERE likes.status <> EXCLUDED.status
    RETURNING (xmax = 0) AS inserted
"#;

const TOGGLE_DELETE_SQL: &str =
    "DELETE FROM likes WHERE user_id = $1 AND post_id = $2 AND status = $3";

const COUNT_LIKES_SQL: &str = r#"
    SELECT
        COUNT(1) FILTER (WHERE status) AS likes_count,
        COUNT(1) FILTER (WHERE NOT status) AS dislikes_count
    FROM likes
    WHERE post_id = $1
"#;

#[derive(Clone)]
pub struct DbLikeRepository {
    pub db: DatabaseConnection,
}

impl LikeRepository for DbLikeRepository {
    async fn toggle(
        &self,
        user_id: i64,
        post_id: i64,
        status: bool,
    ) -> Result<LikeOutcome, BlogServiceError> {
        let outcome = self
            .db
            .transaction::<_, LikeOutcome, DbErr>(move |txn| {
                Box::pin(async move {
                    let backend = txn.get_database_backend();
                    let upserted = txn
                        .query_one(Statement::from_sql_and_values(
                            backend,
                            TOGGLE_UPSERT_SQL,
                            [user_id.into(), post_id.into(), status.into()],
                        ))
                        .await?;

                    if let Some(row) = upserted {
                        let inserted: bool = row.try_get("", "inserted")?;
                        return Ok(if inserted {
                            LikeOutcome::Created
                        } else {
                            LikeOutcome::Updated
                        });
                    }

                    txn.execute(Statement::from_sql_and_values(
                        backend,
                        TOGGLE_DELETE_SQL,
                        [user_id.into(), post_id.into(), status.into()],
                    ))
                    .await?;
                    Ok(LikeOutcome::Removed)
                })
            })
            .await
            .context("toggle like")?;
        Ok(outcome)
    }

    async fn find(&self, user_id: i64, post_id: i64) -> Result<Option<Like>, BlogServiceError> {
        let model = likes::Entity::find()
            .filter(likes::Column::UserId.eq(user_id))
            .filter(likes::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .context("find like")?;
        Ok(model.map(|m| Like {
            id: m.id,
            user_id: m.user_id,
            post_id: m.post_id,
            status: m.status,
        }))
    }

    async fn count_for_post(&self, post_id: i64) -> Result<LikeCounts, BlogServiceError> {
        #[derive(Debug, FromQueryResult)]
        struct LikeCountRow {
            likes_count: i64,
            dislikes_count: i64,
        }

        let row = LikeCountRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            COUNT_LIKES_SQL,
            [post_id.into()],
        ))
        .one(&self.db)
        .await
        .context("count likes for post")?;

        Ok(row
            .map(|r| LikeCounts {
                likes: r.likes_count,
                dislikes: r.dislikes_count,
            })
            .unwrap_or_default())
    }
}
