//! Expense tracking panel.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use voidwear_core::ExpenseId;

use crate::api::types::{Expense, ExpensePayload};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentAdmin, Flash};
use crate::state::AppState;

/// Expense table template, with the inline create form.
#[derive(Template, WebTemplate)]
#[template(path = "expenses/index.html")]
pub struct ExpensesTemplate {
    pub admin: CurrentAdmin,
    pub flash: Option<Flash>,
    pub expenses: Vec<Expense>,
}

/// Expense create form data. Amount and date arrive as strings and are
/// validated here, not by the deserializer, so a typo gets a flash instead
/// of a 422.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub incurred_on: String,
}

impl ExpenseForm {
    fn into_payload(self) -> std::result::Result<ExpensePayload, String> {
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err("La descripción es obligatoria".to_string());
        }

        let amount: Decimal = self
            .amount
            .trim()
            .parse()
            .map_err(|_| "El monto no es un número válido".to_string())?;

        let incurred_on: NaiveDate = self
            .incurred_on
            .parse()
            .map_err(|_| "La fecha no es válida".to_string())?;

        Ok(ExpensePayload {
            description,
            amount,
            category: self.category.trim().to_string(),
            incurred_on,
        })
    }
}

/// Render the expense table.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
) -> Result<ExpensesTemplate> {
    let expenses = state.api().expenses(&auth.token).await?;
    Ok(ExpensesTemplate {
        admin: auth.admin,
        flash: crate::session::take_flash(&session).await?,
        expenses,
    })
}

/// Record a new expense.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Form(form): Form<ExpenseForm>,
) -> Result<Redirect> {
    let flash = match form.into_payload() {
        Ok(payload) => match state.api().create_expense(&auth.token, &payload).await {
            Ok(_) => Flash::success("Gasto registrado"),
            Err(err) => Flash::error(err.detail()),
        },
        Err(message) => Flash::error(message),
    };

    crate::session::push_flash(&session, flash).await?;
    Ok(Redirect::to("/expenses"))
}

/// Delete an expense.
#[instrument(skip(state, auth, session))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Path(id): Path<ExpenseId>,
) -> Result<Redirect> {
    let flash = match state.api().delete_expense(&auth.token, id).await {
        Ok(()) => Flash::success("Gasto eliminado"),
        Err(err) => Flash::error(err.detail()),
    };
    crate::session::push_flash(&session, flash).await?;
    Ok(Redirect::to("/expenses"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(amount: &str, date: &str) -> ExpenseForm {
        ExpenseForm {
            description: "Envío de stock".to_string(),
            amount: amount.to_string(),
            category: "logistica".to_string(),
            incurred_on: date.to_string(),
        }
    }

    #[test]
    fn test_valid_form_parses() {
        let payload = form("12000.50", "2026-02-10").into_payload().expect("payload");
        assert_eq!(payload.amount.to_string(), "12000.50");
        assert_eq!(payload.incurred_on.to_string(), "2026-02-10");
    }

    #[test]
    fn test_bad_amount_and_date_are_rejected() {
        assert!(form("doce mil", "2026-02-10").into_payload().is_err());
        assert!(form("12000", "10/02/2026").into_payload().is_err());
    }

    #[test]
    fn test_blank_description_is_rejected() {
        let mut f = form("12000", "2026-02-10");
        f.description = "   ".to_string();
        assert!(f.into_payload().is_err());
    }
}
