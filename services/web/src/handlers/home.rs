use axum::response::{Html, IntoResponse};
use axum_extra::extract::CookieJar;

use crate::{flash, session::CurrentUser, views};

pub async fn index(user: Option<CurrentUser>, jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    let claims = user.as_ref().map(|user| &user.0);

    (jar, Html(views::home(claims, flash.as_ref())))
}

pub async fn privacy(user: Option<CurrentUser>) -> Html<String> {
    Html(views::privacy(user.as_ref().map(|user| &user.0)))
}
