use crate::{
    auth::{
        hash_password, verify_password, LoginRequest, LoginResponse, RegisterRequest,
        RegisterResponse, TokenService,
    },
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account. The password is bcrypt-hashed before the
/// record is written, so plaintext never reaches the store.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // Username and email are both unique
    let existing_user =
        sqlx::query_as::<_, (i32,)>("SELECT id FROM users WHERE email = $1 OR username = $2")
            .bind(&register_data.email)
            .bind(&register_data.username)
            .fetch_optional(&**pool)
            .await?;

    if existing_user.is_some() {
        return Err(AppError::Validation(
            "username or email already registered".into(),
        ));
    }

    // Hash password
    let password_hash = hash_password(&register_data.password)?;

    // Insert new user
    let (user_id,) = sqlx::query_as::<_, (i32,)>(
        "INSERT INTO users (username, email, password_hash, age) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&register_data.username)
    .bind(&register_data.email)
    .bind(&password_hash)
    .bind(register_data.age)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "user registered successfully".into(),
        id: user_id,
    }))
}

/// Login user
///
/// Authenticates a user by email and password and returns a bearer token.
/// Unknown email and wrong password produce the same 401 so the response
/// never confirms whether an email is registered.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    if login_data.email.is_empty() || login_data.password.is_empty() {
        return Err(AppError::Validation("email and password are required".into()));
    }

    // Get user from database
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, age, created_at \
         FROM users WHERE email = $1",
    )
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some(user) if verify_password(&login_data.password, &user.password_hash) => {
            let token = tokens.issue(user.id)?;
            Ok(HttpResponse::Ok().json(LoginResponse {
                message: "login successful".into(),
                token,
            }))
        }
        _ => Err(AppError::Unauthenticated("invalid email or password".into())),
    }
}
