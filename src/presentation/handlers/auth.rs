use crate::application::auth::current_user::CurrentUserResponse;
use crate::application::auth::forgot_password::{
    ForgotPasswordRequest, ForgotPasswordResponse, ForgotPasswordUseCase,
};
use crate::application::auth::login::{LoginRequest, LoginResponse, LoginUseCase};
use crate::application::auth::logout::LogoutUseCase;
use crate::application::auth::refresh::{RefreshResponse, RefreshTokenUseCase};
use crate::application::auth::register::{RegisterRequest, RegisterResponse, RegisterUseCase};
use crate::application::auth::reset_password::{
    ResetPasswordRequest, ResetPasswordResponse, ResetPasswordUseCase,
};
use crate::application::auth::upload_avatar::UploadAvatarUseCase;
use crate::application::auth::verify_email::{
    VerifyEmailRequest, VerifyEmailResponse, VerifyEmailUseCase,
};
use crate::domain::images::ImageInfo;
use crate::infrastructure::state::AppState;
use crate::presentation::cookies::{self, CookiePolicy};
use crate::presentation::extractors::{AuthUser, RefreshUser};
use crate::presentation::handlers::image_field;
use crate::shared::error::AppError;
use crate::shared::response::WebResponse;
use crate::shared::validation::ValidatedJson;
use axum::extract::{Multipart, State};
use axum_extra::extract::SignedCookieJar;

fn cookie_policy(state: &AppState) -> CookiePolicy {
    CookiePolicy {
        secure: state.config.environment.is_production(),
        access_ttl: state.auth_service.access_token_ttl(),
        refresh_ttl: state.auth_service.refresh_token_ttl(),
    }
}

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<WebResponse<RegisterResponse>, AppError> {
    let use_case = RegisterUseCase::new(
        state.users.clone(),
        state.password_service.clone(),
        state.mailer.clone(),
        state.config.environment.is_production(),
        state.config.frontend_origin.clone(),
    );

    let response = use_case.execute(req).await?;
    Ok(WebResponse::created("User successfully registered", response))
}

pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<VerifyEmailRequest>,
) -> Result<WebResponse<VerifyEmailResponse>, AppError> {
    let use_case = VerifyEmailUseCase::new(state.users.clone());

    let response = use_case.execute(req).await?;
    Ok(WebResponse::ok("Email successfully verified", response))
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(SignedCookieJar, WebResponse<LoginResponse>), AppError> {
    let use_case = LoginUseCase::new(
        state.users.clone(),
        state.auth_service.clone(),
        state.password_service.clone(),
    );

    let response = use_case.execute(req).await?;
    let jar = cookies::set_session(
        jar,
        &response.access_token,
        &response.refresh_token,
        cookie_policy(&state),
    );

    Ok((jar, WebResponse::ok("User successfully logged in", response)))
}

pub async fn current_user(auth: AuthUser) -> WebResponse<CurrentUserResponse> {
    WebResponse::ok(
        "User data successfully retrieved",
        CurrentUserResponse::from(&auth.user),
    )
}

pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    auth: AuthUser,
) -> Result<(SignedCookieJar, WebResponse<bool>), AppError> {
    let use_case = LogoutUseCase::new(state.users.clone());

    let logged_out = use_case.execute(&auth.user).await?;
    let jar = cookies::clear_session(jar, cookie_policy(&state));

    Ok((jar, WebResponse::ok("User successfully logged out", logged_out)))
}

pub async fn refresh_token(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    session: RefreshUser,
) -> Result<(SignedCookieJar, WebResponse<RefreshResponse>), AppError> {
    let use_case = RefreshTokenUseCase::new(state.auth_service.clone());

    let response = use_case.execute(&session.user, session.refresh_token)?;
    let jar = cookies::set_access_token(jar, &response.access_token, cookie_policy(&state));

    Ok((jar, WebResponse::ok("Token successfully refreshed", response)))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ForgotPasswordRequest>,
) -> Result<WebResponse<ForgotPasswordResponse>, AppError> {
    let use_case = ForgotPasswordUseCase::new(
        state.users.clone(),
        state.password_service.clone(),
        state.mailer.clone(),
        state.config.environment.is_production(),
        state.config.frontend_origin.clone(),
        state.config.password_reset_token_ttl,
    );

    let response = use_case.execute(req).await?;
    Ok(WebResponse::ok("Reset password link sent to email", response))
}

pub async fn reset_password(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> Result<(SignedCookieJar, WebResponse<ResetPasswordResponse>), AppError> {
    let use_case = ResetPasswordUseCase::new(state.users.clone(), state.password_service.clone());

    let response = use_case.execute(req).await?;
    let jar = cookies::clear_session(jar, cookie_policy(&state));

    Ok((jar, WebResponse::ok("Password successfully reset", response)))
}

pub async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<WebResponse<ImageInfo>, AppError> {
    let image = image_field(multipart).await?;
    let use_case = UploadAvatarUseCase::new(state.users.clone(), state.image_store.clone());

    let info = use_case.execute(&auth.user, image).await?;
    Ok(WebResponse::ok("Image successfully uploaded", info))
}
