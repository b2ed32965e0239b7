use std::sync::Mutex;

use actix_web::{get, post, HttpResponse, web::{Data, Form}};

use crate::{data::Identity, form::{LoginValues, SignupValues}, provider::{AuthProvider, ProviderError}, session::{lock, ClientSession, Sessions}, state::UserAction};

use super::redirect;

/// Creates the account, then names it. Either step failing fails the signup.
async fn create_account(provider: &dyn AuthProvider, values: &SignupValues) -> Result<Identity, ProviderError> {
    let credential = provider.create_user_with_email_and_password(&values.email, &values.password).await?;
    provider.update_profile(&credential.uid, &values.username).await?;
    Ok(Identity {
        username: values.username.clone(),
        email: values.email.clone(),
        uid: credential.uid,
    })
}

#[post("/auth/signup")]
pub async fn auth_signup(provider: Data<dyn AuthProvider>, sessions: Data<Mutex<Sessions>>, session: ClientSession, Form(form): Form<SignupValues>) -> HttpResponse {
    let values = match lock(&sessions).state_mut(&session).signup.submit(form) {
        Ok(values) => values,
        Err(_) => return redirect("/", &session),
    };
    let outcome = create_account(provider.get_ref(), &values).await;
    let mut sessions = lock(&sessions);
    let state = sessions.state_mut(&session);
    match outcome {
        Ok(identity) => {
            state.user.dispatch(UserAction::SignInUser(identity));
            state.signup.reset();
            state.context.close_signup();
        },
        Err(e) => {
            tracing::warn!(error = %e, "signup rejected");
            state.alert = Some(e.to_string());
        },
    }
    redirect("/", &session)
}

#[post("/auth/login")]
pub async fn auth_login(provider: Data<dyn AuthProvider>, sessions: Data<Mutex<Sessions>>, session: ClientSession, Form(form): Form<LoginValues>) -> HttpResponse {
    if !form.is_complete() {
        lock(&sessions).state_mut(&session).alert = Some("Email and password are required".to_string());
        return redirect("/", &session);
    }
    let outcome = provider.sign_in_with_email_and_password(&form.email, &form.password).await;
    let mut sessions = lock(&sessions);
    let state = sessions.state_mut(&session);
    match outcome {
        Ok(credential) => {
            let username = credential.display_name.unwrap_or_else(|| credential.email.clone());
            state.user.dispatch(UserAction::SignInUser(Identity {
                username,
                email: credential.email,
                uid: credential.uid,
            }));
            state.context.close_login();
        },
        Err(e) => {
            tracing::warn!(error = %e, "login rejected");
            state.alert = Some(e.to_string());
        },
    }
    redirect("/", &session)
}

#[get("/auth/logout")]
pub async fn auth_logout(sessions: Data<Mutex<Sessions>>, session: ClientSession) -> HttpResponse {
    if let Some(state) = lock(&sessions).existing_mut(&session) {
        state.user.dispatch(UserAction::SignOutUser);
        state.context.close_comments();
    }
    redirect("/", &session)
}
