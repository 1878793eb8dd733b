use actix_web::{web, HttpResponse};

use crate::{form::FormSettings, util::see_other};

/// Sends the browser to the pre-filled support email.
#[tracing::instrument(name = "subscriber asked for help", skip_all)]
pub async fn help(settings: web::Data<FormSettings>) -> HttpResponse {
    see_other(settings.help().as_str())
}
