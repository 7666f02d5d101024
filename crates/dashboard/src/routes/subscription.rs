//! Subscription plan selection.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::Redirect};
use tracing::instrument;

use matjari_core::{Plan, Route, SubscriptionTier, UnknownTier};

use crate::error::AppError;
use crate::forms::PlanForm;
use crate::middleware::{RequireIdentity, SessionContext};

/// Plan card view for templates.
#[derive(Debug, Clone)]
pub struct PlanView {
    pub tier: &'static str,
    pub title: &'static str,
    pub price: String,
    pub duration: &'static str,
    pub features: &'static [&'static str],
    pub recommended: bool,
    pub current: bool,
}

impl PlanView {
    fn new(plan: &Plan, current: Option<SubscriptionTier>) -> Self {
        Self {
            tier: plan.tier.as_str(),
            title: plan.tier.label(),
            price: plan.price.to_string(),
            duration: plan.duration,
            features: plan.features,
            recommended: plan.recommended,
            current: current == Some(plan.tier),
        }
    }
}

/// Subscription page template.
#[derive(Template, WebTemplate)]
#[template(path = "subscription.html")]
pub struct SubscriptionTemplate {
    pub plans: Vec<PlanView>,
}

/// Show the three plans.
pub async fn index(RequireIdentity(identity): RequireIdentity) -> SubscriptionTemplate {
    let plans = Plan::all()
        .iter()
        .map(|plan| PlanView::new(plan, identity.subscription))
        .collect();

    SubscriptionTemplate { plans }
}

/// Select a plan: simulated call, then update the identity and go to the
/// dashboard.
#[instrument(skip_all, fields(plan = %form.plan))]
pub async fn select(
    mut context: SessionContext,
    Form(form): Form<PlanForm>,
) -> Result<Redirect, AppError> {
    let tier: SubscriptionTier = form
        .plan
        .parse()
        .map_err(|err: UnknownTier| AppError::BadRequest(err.to_string()))?;

    let updated = context.store_mut().select_plan(tier).await?;
    if !updated {
        return Ok(Redirect::to(Route::Login.path()));
    }
    context.commit().await?;

    Ok(Redirect::to(Route::Dashboard.path()))
}
