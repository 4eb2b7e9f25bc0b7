use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBody { pub error: String, pub detail: Option<String> }

#[derive(ToSchema)]
pub struct UserReadDoc { pub id: i32, pub name: String, pub email: String, pub age: i32, pub student_id: String }

#[derive(ToSchema)]
pub struct UserCreateDoc {
    /// 1..=100 characters
    pub name: String,
    pub email: String,
    /// 0..=150
    pub age: i32,
    /// `S` followed by 7 digits
    pub student_id: String,
}

#[derive(ToSchema)]
pub struct UserUpdateDoc {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub student_id: Option<String>,
}

#[derive(ToSchema)]
pub struct CourseReadDoc { pub id: i32, pub code: String, pub name: String, pub credits: i32 }

#[derive(ToSchema)]
pub struct CourseCreateDoc {
    /// 1..=32 characters
    pub code: String,
    pub name: String,
    /// 1..=120
    pub credits: i32,
}

#[derive(ToSchema)]
pub struct ProjectReadDoc { pub id: i32, pub name: String, pub description: Option<String>, pub owner_id: i32 }

#[derive(ToSchema)]
pub struct ProjectReadWithOwnerDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i32,
    pub owner: Option<UserReadDoc>,
}

#[derive(ToSchema)]
pub struct ProjectCreateDoc { pub name: String, pub description: Option<String>, pub owner_id: i32 }

#[derive(ToSchema)]
pub struct ProjectCreateForUserDoc { pub name: String, pub description: Option<String> }

#[derive(ToSchema)]
pub struct ProjectUpdateDoc { pub name: Option<String>, pub description: Option<String>, pub owner_id: Option<i32> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::courses::create,
        crate::routes::courses::list,
        crate::routes::projects::create,
        crate::routes::projects::list,
        crate::routes::projects::get,
        crate::routes::projects::update,
        crate::routes::projects::replace,
        crate::routes::projects::list_for_user,
        crate::routes::projects::create_for_user,
        crate::routes::users::create,
        crate::routes::users::list,
        crate::routes::users::get,
        crate::routes::users::update,
        crate::routes::users::replace,
        crate::routes::users::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            UserReadDoc,
            UserCreateDoc,
            UserUpdateDoc,
            CourseReadDoc,
            CourseCreateDoc,
            ProjectReadDoc,
            ProjectReadWithOwnerDoc,
            ProjectCreateDoc,
            ProjectCreateForUserDoc,
            ProjectUpdateDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "courses"),
        (name = "projects")
    )
)]
pub struct ApiDoc;
