//! Customer pages.
//!
//! Create and update accept urlencoded forms. A successful submit redirects; a
//! rejected one re-renders the form with the submitted values and an `errors`
//! message so nothing the user typed is lost.

use crate::{
    core::customer::{self, CustomerChanges, NewCustomer},
    entities::{Country, customer::Model as CustomerModel},
    errors::Error,
    web::{AppState, error::GENERIC_FAILURE},
};
use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info};

/// Route of the customer list page.
pub const CUSTOMER_LIST_URL: &str = "/customers/";

/// Route of a customer's detail page.
#[must_use]
pub fn customer_detail_url(customer_id: i64) -> String {
    format!("/customers/{customer_id}/")
}

/// Submitted customer form. Every field is optional in the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomerForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl From<CustomerForm> for NewCustomer {
    fn from(form: CustomerForm) -> Self {
        Self {
            first_name: form.first_name.unwrap_or_default(),
            last_name: form.last_name.unwrap_or_default(),
            street: form.street.unwrap_or_default(),
            city: form.city.unwrap_or_default(),
            state: form.state.unwrap_or_default(),
            zip_code: form.zip_code.unwrap_or_default(),
            country: form.country.unwrap_or_default(),
        }
    }
}

impl From<CustomerForm> for CustomerChanges {
    fn from(form: CustomerForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            street: form.street,
            city: form.city,
            state: form.state,
            zip_code: form.zip_code,
            country: form.country,
        }
    }
}

impl From<&CustomerModel> for CustomerForm {
    fn from(customer: &CustomerModel) -> Self {
        Self {
            first_name: Some(customer.first_name.clone()),
            last_name: Some(customer.last_name.clone()),
            street: Some(customer.street.clone()),
            city: Some(customer.city.clone()),
            state: Some(customer.state.clone()),
            zip_code: Some(customer.zip_code.clone()),
            country: Some(customer.country.code().to_string()),
        }
    }
}

/// A customer as rendered in views.
#[derive(Debug, Serialize)]
pub struct CustomerView {
    pub id: i64,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: &'static str,
    pub country_code: &'static str,
    pub detail_url: String,
    pub edit_url: String,
}

impl From<CustomerModel> for CustomerView {
    fn from(customer: CustomerModel) -> Self {
        Self {
            display_name: customer.display_name(),
            detail_url: customer_detail_url(customer.id),
            edit_url: format!("{}edit", customer_detail_url(customer.id)),
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            street: customer.street,
            city: customer.city,
            state: customer.state,
            zip_code: customer.zip_code,
            country: customer.country.label(),
            country_code: customer.country.code(),
        }
    }
}

fn country_choices() -> Value {
    Country::iter()
        .map(|c| json!({ "code": c.code(), "label": c.label() }))
        .collect()
}

/// Form view document; `customer` is present on the edit page only.
fn form_view(
    status: StatusCode,
    form: &CustomerForm,
    customer: Option<CustomerView>,
    errors: Option<String>,
) -> Response {
    let body = json!({
        "customer": customer,
        "form": form,
        "countries": country_choices(),
        "errors": errors,
    });
    (status, Json(body)).into_response()
}

/// Re-renders a rejected submit. Validation messages are shown as-is; anything else
/// is logged and replaced with a generic message.
fn rejected(form: &CustomerForm, customer: Option<CustomerView>, err: &Error) -> Response {
    match err {
        Error::Validation { message } => form_view(
            StatusCode::UNPROCESSABLE_ENTITY,
            form,
            customer,
            Some(message.clone()),
        ),
        other => {
            error!("Failed to save customer: {}", other);
            form_view(
                StatusCode::INTERNAL_SERVER_ERROR,
                form,
                customer,
                Some(GENERIC_FAILURE.to_string()),
            )
        }
    }
}

/// `GET /customers/`
pub async fn customer_list(State(state): State<AppState>) -> Result<Json<Value>, Error> {
    let customers: Vec<CustomerView> = customer::list_customers(&state.database)
        .await?
        .into_iter()
        .map(CustomerView::from)
        .collect();
    Ok(Json(json!({ "customers": customers })))
}

/// `GET /customers/t/`
pub async fn customer_table(State(state): State<AppState>) -> Result<Json<Value>, Error> {
    let rows: Vec<Value> = customer::list_customers(&state.database)
        .await?
        .into_iter()
        .map(|c| {
            json!([
                c.id,
                c.last_name,
                c.first_name,
                c.street,
                c.city,
                c.state,
                c.zip_code,
                c.country.label(),
            ])
        })
        .collect();
    Ok(Json(json!({
        "columns": ["id", "last_name", "first_name", "street", "city", "state", "zip_code", "country"],
        "rows": rows,
    })))
}

/// `GET /customers/{id}/`
pub async fn customer_detail(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> Result<Json<Value>, Error> {
    let customer = customer::get_customer(&state.database, customer_id).await?;
    Ok(Json(json!({ "customer": CustomerView::from(customer) })))
}

/// `GET /customers/new/`
pub async fn customer_create_form() -> Response {
    form_view(StatusCode::OK, &CustomerForm::default(), None, None)
}

/// `POST /customers/new/`
pub async fn customer_create(
    State(state): State<AppState>,
    Form(form): Form<CustomerForm>,
) -> Response {
    match customer::create_customer(&state.database, NewCustomer::from(form.clone())).await {
        Ok(created) => {
            info!("Customer {} created via form", created.id);
            Redirect::to(CUSTOMER_LIST_URL).into_response()
        }
        Err(err) => rejected(&form, None, &err),
    }
}

/// `GET /customers/{id}/edit`
pub async fn customer_update_form(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> Result<Response, Error> {
    let customer = customer::get_customer(&state.database, customer_id).await?;
    let form = CustomerForm::from(&customer);
    Ok(form_view(StatusCode::OK, &form, Some(customer.into()), None))
}

/// `POST /customers/{id}/edit`
pub async fn customer_update(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    Form(form): Form<CustomerForm>,
) -> Result<Response, Error> {
    let current = customer::get_customer(&state.database, customer_id).await?;
    let response = match customer::apply_customer_changes(
        &state.database,
        &current,
        CustomerChanges::from(form.clone()),
    )
    .await
    {
        Ok(updated) => Redirect::to(&customer_detail_url(updated.id)).into_response(),
        Err(err) => rejected(&form, Some(current.into()), &err),
    };
    Ok(response)
}
