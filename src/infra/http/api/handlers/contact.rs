//! Contact form handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use rengoring_api_types::{ContactRequest, ContactResponse};

use crate::application::contact::ContactForm;

use super::{contact_to_api, json_to_api};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;

pub const CONTACT_CONFIRMATION: &str =
    "Tak for din henvendelse! Vi vender tilbage hurtigst muligt.";

pub async fn submit_contact(
    State(state): State<ApiState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(json_to_api)?;

    let receipt = state
        .contact
        .submit(ContactForm {
            name: payload.name,
            email: payload.email,
            subject: payload.subject,
            message: payload.message,
            priority: payload.priority,
        })
        .await
        .map_err(contact_to_api)?;

    Ok(Json(ContactResponse {
        success: true,
        message: CONTACT_CONFIRMATION.to_string(),
        reference: receipt.reference,
    }))
}
